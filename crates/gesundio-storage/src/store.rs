//! Object store seam. [`S3Store`] is the production implementation; anything
//! else with the same semantics can stand in for it.

use std::time::Duration;

use aws_sdk_s3::Client;

use gesundio_core::backend::BoxFuture;

use crate::error::StorageError;
use crate::objects;

/// Flat key/value object storage.
pub trait ObjectStore: Send + Sync {
    /// Object bytes, or `StorageError::NotFound`.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>>;

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Write only when `key` is free; `StorageError::PreconditionFailed`
    /// otherwise. At most one of several racing writers succeeds.
    fn put_if_absent<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>>;

    /// Time-limited read URL for `key`.
    fn presign_get<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>>;
}

/// One S3 bucket.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl ObjectStore for S3Store {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(objects::get_object(&self.client, &self.bucket, key))
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(objects::put_object(
            &self.client,
            &self.bucket,
            key,
            body,
            content_type,
        ))
    }

    fn put_if_absent<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(objects::put_object_if_absent(
            &self.client,
            &self.bucket,
            key,
            body,
            content_type,
        ))
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(objects::list_objects(&self.client, &self.bucket, prefix))
    }

    fn presign_get<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(objects::presign_get(&self.client, &self.bucket, key, expires_in))
    }
}
