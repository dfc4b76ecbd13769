//! Cached profile blob stored next to the session as `{"data": {...}}`.

use serde_json::{Map, Value, json};

use super::{STORAGE_PROFILE_DATA, Storage, StorageError};

/// Replaces the cached profile with `profile`.
///
/// # Errors
/// Returns `StorageError` if the blob cannot be written.
pub fn store_profile(storage: &dyn Storage, profile: &Value) -> Result<(), StorageError> {
    let blob = json!({ "data": profile });
    storage.set(STORAGE_PROFILE_DATA, &blob.to_string())
}

/// Reads the cached profile object, if any.
///
/// # Errors
/// Returns `StorageError` if the blob cannot be read.
pub fn load_profile(storage: &dyn Storage) -> Result<Option<Value>, StorageError> {
    let Some(raw) = storage.get(STORAGE_PROFILE_DATA)? else {
        return Ok(None);
    };
    let blob: Value = serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt {
        key: STORAGE_PROFILE_DATA.to_string(),
        message: err.to_string(),
    })?;
    Ok(blob.get("data").filter(|data| data.is_object()).cloned())
}

/// Sets one field of the cached profile, creating the blob when missing.
/// An unreadable blob is replaced.
///
/// # Errors
/// Returns `StorageError` if the blob cannot be written.
pub fn update_profile_field(
    storage: &dyn Storage,
    field: &str,
    value: Value,
) -> Result<(), StorageError> {
    let mut data = match load_profile(storage) {
        Ok(Some(Value::Object(map))) => map,
        Ok(_) | Err(StorageError::Corrupt { .. }) => Map::new(),
        Err(err) => return Err(err),
    };
    data.insert(field.to_string(), value);
    store_profile(storage, &Value::Object(data))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;

    #[test]
    fn update_creates_blob() {
        let storage = MemoryStorage::new();
        update_profile_field(&storage, "avatar_url", json!("https://cdn/a.png")).unwrap();
        assert_eq!(
            load_profile(&storage).unwrap(),
            Some(json!({"avatar_url": "https://cdn/a.png"}))
        );
    }

    #[test]
    fn update_merges_into_existing_profile() {
        let storage = MemoryStorage::new();
        store_profile(&storage, &json!({"name": "Asha", "role": "admin"})).unwrap();
        update_profile_field(&storage, "name", json!("Asha K")).unwrap();
        assert_eq!(
            load_profile(&storage).unwrap(),
            Some(json!({"name": "Asha K", "role": "admin"}))
        );
    }

    #[test]
    fn update_replaces_corrupt_blob() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_PROFILE_DATA, "{{{").unwrap();
        assert!(load_profile(&storage).is_err());
        update_profile_field(&storage, "name", json!("Ravi")).unwrap();
        assert_eq!(load_profile(&storage).unwrap(), Some(json!({"name": "Ravi"})));
    }
}
