use std::time::Duration;

use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;

use super::error::StorageError;
use super::traits::ObjectStore;
use crate::config::RemoteStorageConfig;
use crate::retry::RetryPolicy;

/// S3-compatible object store.
///
/// Returns `{public_url}/{key}` when a public base URL is configured,
/// otherwise a presigned GET URL.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    prefix: Option<String>,
    public_url: Option<String>,
    presign_expiry_secs: u32,
    timeout: Duration,
    retry: RetryPolicy,
}

impl S3ObjectStore {
    pub fn new(config: &RemoteStorageConfig) -> Result<Self, StorageError> {
        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(ak), Some(sk)) => Credentials::new(Some(ak), Some(sk), None, None, None),
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::NotConfigured(format!("S3 credentials: {e}")))?;

        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse().map_err(|_| {
                StorageError::NotConfigured(format!("invalid S3 region: {}", config.region))
            })?,
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::NotConfigured(format!("S3 bucket: {e}")))?;
        let bucket = if config.endpoint.is_some() {
            bucket.with_path_style()
        } else {
            bucket
        };

        tracing::info!(
            bucket = %config.bucket,
            public = config.public_url.is_some(),
            "Remote object storage configured"
        );

        Ok(Self {
            bucket,
            prefix: config
                .prefix
                .as_ref()
                .map(|p| p.trim_matches('/').to_string())
                .filter(|p| !p.is_empty()),
            public_url: config
                .public_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            presign_expiry_secs: config.presign_expiry_secs,
            timeout: Duration::from_secs(config.timeout_secs),
            retry: RetryPolicy::new(config.max_retries),
        })
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}/{key}"),
            None => key.to_string(),
        }
    }

    async fn put_once(
        &self,
        full_key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = tokio::time::timeout(
            self.timeout,
            self.bucket
                .put_object_with_content_type(full_key, data, content_type),
        )
        .await
        .map_err(|_| StorageError::Timeout(self.timeout))?
        .map_err(|e| StorageError::Remote(e.to_string()))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::Remote(format!(
                "unexpected status {status} for '{full_key}'"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let full_key = self.full_key(key);

        self.retry
            .run("s3_put", |_| self.put_once(&full_key, data, content_type))
            .await?;
        tracing::debug!(key = %full_key, "S3 put object successful");

        match &self.public_url {
            Some(base) => Ok(format!("{base}/{full_key}")),
            None => self
                .bucket
                .presign_get(&full_key, self.presign_expiry_secs, None)
                .await
                .map_err(|e| StorageError::Remote(format!("presign failed: {e}"))),
        }
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}
