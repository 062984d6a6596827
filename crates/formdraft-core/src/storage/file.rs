//! File-based storage implementation for native platforms.

use super::{LayoutStore, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Each key is a JSON file in the base directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for stored layouts.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/formdraft/layouts/`
    /// On Windows: `%LOCALAPPDATA%\formdraft\layouts\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Unavailable("Could not determine home directory".to_string()))?;

        Self::new(base.join("formdraft").join("layouts"))
    }

    /// Get the file path for a key.
    fn key_path(&self, key: &str) -> PathBuf {
        // Sanitize key to be safe for filenames
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl LayoutStore for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        fs::create_dir_all(&self.base_path)
            .and_then(|_| fs::write(&path, value))
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_write_read() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.write("componentLayout", "[{\"type\":\"unknown\"}]").unwrap();
        assert_eq!(
            storage.read("componentLayout").unwrap().as_deref(),
            Some("[{\"type\":\"unknown\"}]")
        );
        assert!(dir.path().join("componentLayout.json").exists());
    }

    #[test]
    fn test_file_storage_missing_key() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(storage.read("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_file_storage_sanitizes_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.write("../escape", "[]").unwrap();
        assert!(dir.path().join("___escape.json").exists());
        assert_eq!(storage.read("../escape").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_overwrites() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.write("layout", "[1]").unwrap();
        storage.write("layout", "[2]").unwrap();
        assert_eq!(storage.read("layout").unwrap().as_deref(), Some("[2]"));
    }
}
