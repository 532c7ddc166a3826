//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Add a reaction to a photo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddReactionRequest {
    #[validate(length(min = 1, max = 16, message = "reactor_name must be 1-16 characters"))]
    pub reactor_name: String,

    /// Checked against the allowed reaction set by the service
    #[validate(length(min = 1, max = 32, message = "reaction must be 1-32 characters"))]
    pub reaction: String,
}

/// Change the kind of an existing reaction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReactionRequest {
    #[validate(length(min = 1, max = 32, message = "reaction must be 1-32 characters"))]
    pub reaction: String,
}

/// Photo-of-the-day period selection.
///
/// Either `start_date` and `end_date` together, or `days` looking back from now.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PhotoOfDayQuery {
    #[validate(range(min = 1, max = 365, message = "days must be between 1 and 365"))]
    pub days: Option<u32>,

    pub start_date: Option<String>,

    pub end_date: Option<String>,
}
