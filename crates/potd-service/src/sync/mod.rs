//! Stats synchronization
//!
//! Keeps the stats projection consistent with the reaction log:
//! - incremental recompute after every reaction mutation, serialized per photo
//! - full resync at startup and on demand, fenced against recomputes

mod controller;
mod lock;
mod retry;

pub use controller::{ResyncReport, SyncController};
pub use lock::{KeyGuard, KeyLocks};
pub use retry::RetryPolicy;
