//! Axum extractors for request handling
//!
//! Custom extractors for validated bodies, query strings and photo paths.

mod path;
mod query;
mod validated;

pub use path::{PhotoPath, ReactorPath};
pub use query::ValidatedQuery;
pub use validated::ValidatedJson;
