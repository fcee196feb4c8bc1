//! JSON records stored one per object.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::store::ObjectStore;

const JSON: &str = "application/json";

/// Load and deserialize a JSON record.
pub async fn load<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<T, StorageError> {
    let body = store.get(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Like [`load`], but a missing object is `Ok(None)`.
pub async fn find<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match load(store, key).await {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn save<T: Serialize>(
    store: &dyn ObjectStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put(key, body, JSON).await
}

/// Like [`save`], but fails with `StorageError::PreconditionFailed` when a
/// record already exists at `key`.
pub async fn create<T: Serialize>(
    store: &dyn ObjectStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_if_absent(key, body, JSON).await
}

/// Load every JSON record under a prefix. Objects deleted between listing and
/// reading are skipped.
pub async fn load_all<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = store.list(prefix).await?;
    let mut records = Vec::with_capacity(keys.len());
    for key in keys.iter().filter(|k| k.ends_with(".json")) {
        if let Some(record) = find(store, key).await? {
            records.push(record);
        }
    }
    Ok(records)
}
