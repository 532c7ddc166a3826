//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod admin;
pub mod health;
pub mod photo_of_day;
pub mod reactions;
pub mod stats;
