//! Path parameter extractors
//!
//! Photos are addressed as `/:display_name/:photo_id`; the photo id is kept as
//! a string here so a malformed id gets our own error body.

use serde::Deserialize;

use crate::response::ApiError;

fn parse_photo_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid photo_id format"))
}

/// Path parameters identifying a photo
#[derive(Debug, Deserialize)]
pub struct PhotoPath {
    pub display_name: String,
    pub photo_id: String,
}

impl PhotoPath {
    /// Parse photo_id as an integer
    pub fn photo_id(&self) -> Result<i64, ApiError> {
        parse_photo_id(&self.photo_id)
    }
}

/// Path parameters identifying one reactor's reaction on a photo
#[derive(Debug, Deserialize)]
pub struct ReactorPath {
    pub display_name: String,
    pub photo_id: String,
    pub reactor_name: String,
}

impl ReactorPath {
    /// Parse photo_id as an integer
    pub fn photo_id(&self) -> Result<i64, ApiError> {
        parse_photo_id(&self.photo_id)
    }
}
