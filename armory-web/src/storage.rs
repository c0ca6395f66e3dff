//! `window.localStorage` behind the core key-value contract.
use armory_core::{KeyValueStore, StorageError};
use web_sys::Storage;

use crate::dom;

/// Browser-local store. Cloning shares the same underlying storage.
#[derive(Clone)]
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    /// Bind to `localStorage`. When storage is disabled (private browsing,
    /// sandboxed frames) the store reads nothing and rejects writes.
    #[must_use]
    pub fn open() -> Self {
        let storage = dom::local_storage()
            .inspect_err(|err| {
                log::warn!("localStorage unavailable: {}", dom::js_error_message(err));
            })
            .ok();
        Self { storage }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn backend(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Backend("localStorage unavailable".to_owned()))
    }
}

fn backend_error(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(dom::js_error_message(err))
}

impl KeyValueStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(|e| backend_error(&e)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.backend()?
            .set_item(key, value)
            .map_err(|e| backend_error(&e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend()?
            .remove_item(key)
            .map_err(|e| backend_error(&e))
    }
}
