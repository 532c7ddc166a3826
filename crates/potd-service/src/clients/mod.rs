//! Clients for collaborating services

mod photo;

pub use photo::{HttpPhotoDirectory, PhotoClientError, UncheckedPhotoDirectory};
