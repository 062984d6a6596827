//! Key-value persistence for saved layouts.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string store addressed by key, like browser `localStorage`.
///
/// Writes replace whatever the key held before.
pub trait LayoutStore {
    /// Read the value under `key`, `None` if nothing is stored there.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Storage used by the application on the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

/// Storage used by the application on the current platform.
#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Open the platform's default store.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    FileStorage::default_location()
}

/// Open the platform's default store.
#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    LocalStorage::new()
}
