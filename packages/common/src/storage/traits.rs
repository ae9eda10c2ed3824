use async_trait::async_trait;

use super::error::StorageError;

/// Write-only object storage addressed by key.
///
/// `put` returns a locator: either an absolute URL or a root-relative path
/// that the serving host must absolutize at read time.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under `key` and return the locator for the stored object.
    async fn put(&self, key: &str, data: &[u8], content_type: &str)
    -> Result<String, StorageError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
