//! Persisted key/value storage backing the session.
//!
//! Multi-key writes go through [`Storage::set_all`] and [`Storage::remove_all`]
//! so a pair of entries is never left half-written.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::models::errors::StorageError;

pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.set_all(&[(key, value)])
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.remove_all(&[key])
    }
}

#[derive(Default, Debug, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// JSON object on disk, rewritten whole on every mutation.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        debug!("opened storage {} with {} entries", path.display(), entries.len());

        Ok(Self { path, entries })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert(key.to_string(), value.clone());
        }
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_all(&[("user", "1".to_string()), ("token", "abc".to_string())]).unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("user").as_deref(), Some("1"));
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn remove_all_clears_keys_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set("token", "abc".to_string()).unwrap();
        storage.set("other", "kept".to_string()).unwrap();
        storage.remove_all(&["user", "token"]).unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("token"), None);
        assert_eq!(reopened.get("other").as_deref(), Some("kept"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStorage::open(&path), Err(StorageError::Format(_))));
    }

    #[test]
    fn memory_storage_set_and_remove() {
        let mut storage = MemoryStorage::new();
        storage.set("token", "abc".to_string()).unwrap();
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        storage.remove("token").unwrap();
        assert_eq!(storage.get("token"), None);
    }
}
