//! Integration test utilities for the photo-of-the-day server
//!
//! Helpers for running end-to-end tests against the REST API with the
//! in-memory storage backend.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
