//! Reaction kinds and the configured set of allowed kinds

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Kinds accepted when no explicit list is configured
pub const DEFAULT_REACTIONS: [&str; 7] = ["coeur", "pouce", "love", "fire", "wow", "sad", "sourire"];

/// Emoji-style reaction category (e.g. `coeur`, `fire`)
///
/// The newtype itself does not validate: rows read back from storage are
/// trusted. Input from clients goes through [`AllowedReactions::parse`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionKind(String);

impl ReactionKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReactionKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fixed set of reaction kinds clients may submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedReactions {
    kinds: Vec<String>,
}

impl AllowedReactions {
    /// Build from a list of kinds; blanks and duplicates are dropped, order is kept
    pub fn new<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for kind in kinds {
            let kind = kind.into().trim().to_string();
            if !kind.is_empty() && !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self { kinds: unique }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }

    /// Validate client input against the allowed set
    pub fn parse(&self, kind: &str) -> Result<ReactionKind, DomainError> {
        if self.contains(kind) {
            Ok(ReactionKind::new(kind))
        } else {
            Err(DomainError::InvalidReactionKind {
                kind: kind.to_string(),
                allowed: self.kinds.clone(),
            })
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.kinds
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for AllowedReactions {
    fn default() -> Self {
        Self::new(DEFAULT_REACTIONS)
    }
}
