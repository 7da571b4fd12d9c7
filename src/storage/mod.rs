//! Durable key-value storage
//!
//! The session state only needs string get/set/remove, the same surface a
//! browser's local storage offers. Two providers are included: an in-memory
//! map and a JSON file under the project's `.prompt-perfect` directory.

mod data_dir;
mod file;

use std::collections::BTreeMap;

use crate::error::StorageError;

pub use data_dir::{get_data_dir, get_storage_file_path, DATA_DIR_NAME};
pub use file::FileStorage;

/// Storage key holding the prompt text
pub const PROMPT_KEY: &str = "promptPerfect_prompt";

/// Storage key holding the last enhanced output
pub const OUTPUT_KEY: &str = "promptPerfect_output";

/// String key-value store
pub trait StorageProvider {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Non-durable store, used by tests and embedders without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StorageProvider for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get_item(PROMPT_KEY).is_none());

        storage.set_item(PROMPT_KEY, "hello").unwrap();
        assert_eq!(storage.get_item(PROMPT_KEY).as_deref(), Some("hello"));
        assert_eq!(storage.len(), 1);

        storage.remove_item(PROMPT_KEY).unwrap();
        assert!(storage.get_item(PROMPT_KEY).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_remove_missing_key_is_ok() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove_item(OUTPUT_KEY).is_ok());
    }
}
