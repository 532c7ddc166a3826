//! Photo existence lookups against the photo service

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use potd_core::{DomainError, ItemKey, PhotoDirectory, RepoResult};

/// Errors building a photo service client
#[derive(Debug, Error)]
pub enum PhotoClientError {
    #[error("Invalid photo service URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

/// `GET {base}/photo/{display_name}/{photo_id}`: 200 exists, 404 missing
#[derive(Debug, Clone)]
pub struct HttpPhotoDirectory {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPhotoDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PhotoClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| PhotoClientError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(PhotoClientError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PhotoClientError::Http)?;

        Ok(Self { client, base_url })
    }

    fn photo_url(&self, key: &ItemKey) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["photo", key.subject_id(), &key.item_id().to_string()]);
        }
        url
    }
}

#[async_trait]
impl PhotoDirectory for HttpPhotoDirectory {
    #[instrument(skip(self), fields(subject_id = %key.subject_id, item_id = key.item_id))]
    async fn photo_exists(&self, key: &ItemKey) -> RepoResult<bool> {
        let url = self.photo_url(key);
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Photo service request failed");
            DomainError::PhotoServiceUnavailable(e.to_string())
        })?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => {
                debug!("Photo not found");
                Ok(false)
            }
            status => {
                warn!(status = status.as_u16(), "Unexpected photo service status");
                Err(DomainError::PhotoServiceUnavailable(format!(
                    "photo service answered {status}"
                )))
            }
        }
    }
}

/// Accepts every photo; used when no photo service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UncheckedPhotoDirectory;

#[async_trait]
impl PhotoDirectory for UncheckedPhotoDirectory {
    async fn photo_exists(&self, _key: &ItemKey) -> RepoResult<bool> {
        Ok(true)
    }
}
