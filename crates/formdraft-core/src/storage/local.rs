//! Browser `localStorage` implementation for WASM.

use super::{LayoutStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;

fn js_error(context: &str, err: JsValue) -> StorageError {
    StorageError::Io(format!("{context}: {err:?}"))
}

/// Layout storage backed by the page's `localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("Failed to access localStorage", e))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl LayoutStore for LocalStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("Failed to read from localStorage", e))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        // Quota errors surface here.
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("Failed to write to localStorage", e))
    }
}
