use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Raw byte storage for a whole JSON document.
/// Implementations can be file-backed, in-memory, or remote blobs.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the full document; `None` when it does not exist yet.
    async fn read(&self) -> Result<Option<Vec<u8>>, ServiceError>;
    /// Replace the full document.
    async fn write(&self, bytes: &[u8]) -> Result<(), ServiceError>;
    /// Human readable location, used in log fields.
    fn describe(&self) -> String;
}

/// Document stored in a single file on disk.
///
/// Each write lands in its own `<path>.<uuid>.tmp` and is renamed over the
/// target, so a crash mid-write leaves the previous document intact and
/// concurrent writers never share a scratch file.
#[derive(Clone, Debug)]
pub struct FileBackend {
    file_path: PathBuf,
}

impl FileBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let ext = self.file_path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        self.file_path.with_extension(format!("{ext}.{}.tmp", Uuid::new_v4()))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::storage(format!("read {}: {e}", self.file_path.display()))),
        }
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }
        let tmp = self.tmp_path();
        if let Err(e) = fs::write(&tmp, bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::storage(format!("write {}: {e}", tmp.display())));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::storage(format!("rename to {}: {e}", self.file_path.display())));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

/// Document held in process memory. Handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: RwLock<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given raw bytes, valid JSON or not.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { inner: RwLock::new(Some(bytes.into())) }
    }

    pub async fn snapshot(&self) -> Option<Vec<u8>> {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), ServiceError> {
        *self.inner.write().await = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
