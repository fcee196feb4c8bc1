//! gesundio-core
//!
//! Pure domain types, option catalogues, object-key and route conventions,
//! and the persistence collaborator contract.
//! No AWS SDK dependency; this is the shared vocabulary of the Gesundio system.

pub mod backend;
pub mod catalog;
pub mod error;
pub mod field_kind;
pub mod models;
pub mod routes;
pub mod s3_keys;
