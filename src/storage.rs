/// Key-value backends for the remembered host

use crate::error::WidgetError;
use std::cell::RefCell;
use std::collections::HashMap;

/// Minimal string key-value store, shaped after `window.localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, WidgetError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), WidgetError>;
    fn remove_item(&self, key: &str) -> Result<(), WidgetError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, WidgetError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), WidgetError> {
        (**self).remove_item(key)
    }
}

/// In-page store, used when `localStorage` is unavailable and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, WidgetError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), WidgetError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Origin-wide persistent store backed by `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage; fails in sandboxed or storage-disabled contexts
    pub fn open() -> Result<Self, WidgetError> {
        let window = web_sys::window().ok_or(WidgetError::NoWindow)?;
        let storage = window
            .local_storage()
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))?
            .ok_or(WidgetError::StorageUnavailable)?;

        Ok(LocalStorage { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, WidgetError> {
        self.storage
            .get_item(key)
            .map_err(|e| WidgetError::Storage(format!("Failed to read {}: {:?}", key, e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| WidgetError::Storage(format!("Failed to write {}: {:?}", key, e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), WidgetError> {
        self.storage
            .remove_item(key)
            .map_err(|e| WidgetError::Storage(format!("Failed to remove {}: {:?}", key, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_set_and_get() {
        let store = MemoryStore::new();
        store.set_item("key", "hachyderm.io").unwrap();
        assert_eq!(store.get_item("key").unwrap(), Some("hachyderm.io".to_string()));

        store.set_item("key", "fosstodon.org").unwrap();
        assert_eq!(store.get_item("key").unwrap(), Some("fosstodon.org".to_string()));
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.set_item("key", "hachyderm.io").unwrap();
        store.remove_item("key").unwrap();
        assert_eq!(store.get_item("key").unwrap(), None);

        // Removing an absent key is fine
        store.remove_item("key").unwrap();
    }

    #[test]
    fn test_boxed_store() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set_item("key", "value").unwrap();
        assert_eq!(store.get_item("key").unwrap(), Some("value".to_string()));
    }
}
