use std::{
    collections::{BTreeMap, HashMap},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not a key/value object: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable string slots keyed by name, the way a browser's local storage works.
#[async_trait]
pub trait CartStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// All keys live in one JSON object on disk, rewritten wholesale on every write.
pub struct FileStorage {
    path: PathBuf,
    // serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, slots: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(slots)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CartStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read_all().await?;
        Ok(slots.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read_all().await?;
        slots.insert(key.to_string(), value.to_string());
        self.write_all(&slots).await
    }
}

/// Process-local storage. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self {
            slots: Mutex::new(slots),
        }
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nope.json"));

        assert_eq!(storage.get_item("@RocketShoes:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_item_creates_parent_dirs_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/ls.json"));

        storage.set_item("theme", "dark").await.unwrap();
        storage.set_item("@RocketShoes:cart", "[]").await.unwrap();
        storage.set_item("@RocketShoes:cart", "[1]").await.unwrap();

        assert_eq!(storage.get_item("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(
            storage.get_item("@RocketShoes:cart").await.unwrap().as_deref(),
            Some("[1]")
        );
        assert!(!storage.path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn garbage_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        let err = storage.get_item("k").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[tokio::test]
    async fn memory_storage_overwrites_slot() {
        let storage = MemoryStorage::with_item("k", "a");
        storage.set_item("k", "b").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("b"));
    }
}
