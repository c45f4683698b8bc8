//! Typed reads and writes on top of the raw JSON store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{KeyValueStore, StorageError};

/// Load and decode the value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the stored value does not match `T`,
/// or any backend error.
pub async fn load<T: DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(value) = kv.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| StorageError::Serialization(format!("{key}: {err}")))
}

/// Encode `value` and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if `value` cannot be encoded, or any
/// backend error.
pub async fn store<T: Serialize + ?Sized + Sync>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let encoded =
        serde_json::to_value(value).map_err(|err| StorageError::Serialization(err.to_string()))?;
    kv.set(key, encoded).await
}
