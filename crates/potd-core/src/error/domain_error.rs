//! Domain errors - error types for the domain layer

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::value_objects::ItemKey;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Photo not found: {0}")]
    PhotoNotFound(ItemKey),

    #[error("Reaction by '{actor_id}' not found on photo {key}")]
    ReactionNotFound { key: ItemKey, actor_id: String },

    #[error("No stats recorded for photo {0}")]
    StatsNotFound(ItemKey),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reaction '{kind}', allowed: {}", .allowed.join(", "))]
    InvalidReactionKind { kind: String, allowed: Vec<String> },

    #[error("Invalid time window: start {start} must be before end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction by '{actor_id}' already exists on photo {key}")]
    ReactionAlreadyExists { key: ItemKey, actor_id: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Photo service unavailable: {0}")]
    PhotoServiceUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PhotoNotFound(_) => "UNKNOWN_PHOTO",
            Self::ReactionNotFound { .. } => "UNKNOWN_REACTION",
            Self::StatsNotFound(_) => "UNKNOWN_STATS",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionKind { .. } => "INVALID_REACTION_KIND",
            Self::InvalidWindow { .. } => "INVALID_WINDOW",

            // Conflict
            Self::ReactionAlreadyExists { .. } => "REACTION_ALREADY_EXISTS",

            // Infrastructure
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::PhotoServiceUnavailable(_) => "PHOTO_SERVICE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PhotoNotFound(_) | Self::ReactionNotFound { .. } | Self::StatsNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidReactionKind { .. } | Self::InvalidWindow { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionAlreadyExists { .. })
    }

    /// Check if a dependency could not be reached (maps to 503)
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable(_) | Self::PhotoServiceUnavailable(_)
        )
    }

    /// Transient storage failures are the only errors worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::PhotoNotFound(ItemKey::new("john", 5));
        assert_eq!(err.code(), "UNKNOWN_PHOTO");

        let err = DomainError::StorageUnavailable("connection refused".to_string());
        assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::PhotoNotFound(ItemKey::new("j", 1)).is_not_found());
        assert!(DomainError::ReactionNotFound {
            key: ItemKey::new("j", 1),
            actor_id: "alice".to_string(),
        }
        .is_not_found());
        assert!(!DomainError::StorageUnavailable("x".to_string()).is_not_found());
    }

    #[test]
    fn test_only_storage_errors_are_retryable() {
        assert!(DomainError::StorageUnavailable("timeout".to_string()).is_retryable());
        assert!(!DomainError::PhotoServiceUnavailable("down".to_string()).is_retryable());
        assert!(!DomainError::ValidationError("bad".to_string()).is_retryable());
        assert!(DomainError::PhotoServiceUnavailable("down".to_string()).is_unavailable());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidReactionKind {
            kind: "angry".to_string(),
            allowed: vec!["coeur".to_string(), "fire".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid reaction 'angry', allowed: coeur, fire");

        let err = DomainError::ReactionAlreadyExists {
            key: ItemKey::new("john", 5),
            actor_id: "hcartier".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Reaction by 'hcartier' already exists on photo john/5"
        );
    }
}
