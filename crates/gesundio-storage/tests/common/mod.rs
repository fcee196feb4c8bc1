#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gesundio_core::backend::BoxFuture;
use gesundio_storage::error::StorageError;
use gesundio_storage::store::ObjectStore;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// In-memory [`ObjectStore`]. Clones share the same objects.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
    /// Written just before the next conditional put, as if another writer
    /// got there first.
    contender: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemoryStore {
    pub fn insert_json(&self, key: &str, value: serde_json::Value) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body: serde_json::to_vec(&value).unwrap(),
                content_type: "application/json".to_string(),
            },
        );
    }

    pub fn before_next_create(&self, key: &str, value: serde_json::Value) {
        self.contender
            .lock()
            .unwrap()
            .push((key.to_string(), serde_json::to_vec(&value).unwrap()));
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn json(&self, key: &str) -> serde_json::Value {
        let object = self.object(key).unwrap_or_else(|| panic!("no object at {key}"));
        serde_json::from_slice(&object.body).unwrap()
    }

    fn write(&self, key: &str, body: Vec<u8>, content_type: &str) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
    }
}

impl ObjectStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(async move {
            self.object(key)
                .map(|o| o.body)
                .ok_or_else(|| StorageError::NotFound {
                    key: key.to_string(),
                })
        })
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.write(key, body, content_type);
            Ok(())
        })
    }

    fn put_if_absent<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let contenders: Vec<_> = self.contender.lock().unwrap().drain(..).collect();
            for (k, b) in contenders {
                self.write(&k, b, "application/json");
            }
            if self.object(key).is_some() {
                return Err(StorageError::PreconditionFailed {
                    key: key.to_string(),
                });
            }
            self.write(key, body, content_type);
            Ok(())
        })
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async move { Ok(self.keys().into_iter().filter(|k| k.starts_with(prefix)).collect()) })
    }

    fn presign_get<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move { Ok(format!("memory://{key}?expires={}", expires_in.as_secs())) })
    }
}
