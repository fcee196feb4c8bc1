//! gesundio-storage
//!
//! Object-store persistence for users, patients and appointments. Thin
//! wrapper around the AWS S3 SDK behind the [`store::ObjectStore`] seam, plus
//! the [`backend::StorageBackend`] adapter.

pub mod backend;
pub mod client;
pub mod error;
pub mod objects;
pub mod records;
pub mod store;
