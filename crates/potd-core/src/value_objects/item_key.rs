//! Item key - identifies one photo within a photographer's collection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a reactable item: `(subject_id, item_id)`.
///
/// The derived ordering compares `subject_id` byte-wise first and `item_id`
/// numerically second. Window queries rely on it to break ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub subject_id: String,
    pub item_id: i64,
}

impl ItemKey {
    /// Create a new ItemKey
    pub fn new(subject_id: impl Into<String>, item_id: i64) -> Self {
        Self {
            subject_id: subject_id.into(),
            item_id,
        }
    }

    #[inline]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    #[inline]
    pub fn item_id(&self) -> i64 {
        self.item_id
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject_id, self.item_id)
    }
}
