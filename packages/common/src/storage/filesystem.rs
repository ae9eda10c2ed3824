use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::traits::ObjectStore;

/// Local-disk object store.
///
/// Objects live at `{base_path}/{key}` and are addressed as
/// `{public_prefix}/{key}`, a root-relative path served by the HTTP layer.
pub struct LocalObjectStore {
    base_path: PathBuf,
    public_prefix: String,
    max_size: u64,
}

impl LocalObjectStore {
    /// Create a new local store, creating the base directory if needed.
    pub async fn new(
        base_path: PathBuf,
        public_prefix: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            public_prefix: format!("/{}", public_prefix.trim_matches('/')),
            max_size,
        })
    }

    /// Resolve a key to its on-disk path, rejecting traversal.
    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe || key.starts_with(".tmp") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(relative))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    #[cfg(test)]
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        Ok(fs::read(self.object_path(key)?).await?)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let object_path = self.object_path(key)?;
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &object_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(format!("{}/{}", self.public_prefix.trim_end_matches('/'), key))
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
