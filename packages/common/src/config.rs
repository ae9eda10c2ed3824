use std::path::PathBuf;

use serde::Deserialize;

/// File storage configuration shared by the upload path and the static file server.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory for the local-disk fallback. Default: "./uploads".
    #[serde(default = "default_local_root")]
    pub local_root: PathBuf,
    /// URL path under which local files are served. Default: "/uploads".
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Per-file upload limit in bytes. Default: 64 MiB.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Fail uploads instead of falling back to local disk when the remote write fails.
    #[serde(default)]
    pub require_remote: bool,
    /// Remote object storage. Absent means local disk only.
    #[serde(default)]
    pub remote: Option<RemoteStorageConfig>,
}

/// S3-compatible object storage settings.
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteStorageConfig {
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint (MinIO, R2, ...). Enables path-style addressing.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Key prefix prepended to every object.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Public base URL of the bucket. When absent, presigned URLs are returned.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Lifetime of presigned URLs. Default: 7 days.
    #[serde(default = "default_presign_expiry_secs")]
    pub presign_expiry_secs: u32,
    /// Per-attempt request timeout. Default: 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after the first failure. Default: 2.
    #[serde(default = "default_max_retries")]
    pub max_retries: u8,
}

fn default_local_root() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_public_prefix() -> String {
    "/uploads".into()
}
fn default_max_file_size() -> u64 {
    64 * 1024 * 1024
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_presign_expiry_secs() -> u32 {
    7 * 24 * 60 * 60
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u8 {
    2
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            local_root: default_local_root(),
            public_prefix: default_public_prefix(),
            max_file_size: default_max_file_size(),
            require_remote: false,
            remote: None,
        }
    }
}
