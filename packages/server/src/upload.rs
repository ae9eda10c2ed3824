//! Upload gateway and per-file registration.
//!
//! Bytes go to remote object storage when configured, falling back to the
//! local disk when the remote write fails (unless `require_remote` is set).
//! Each uploaded file gets one id under which both a content record and a
//! URL record are written.

use std::sync::Arc;

use common::StorageConfig;
use common::storage::filesystem::LocalObjectStore;
use common::storage::{ObjectStore, StorageError};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::locator::{LocatorStore, UrlRecord};
use crate::utils::filename::key_extension;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Document,
    Video,
}

impl MediaKind {
    /// Storage sub-path for this kind.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Document => "docs",
            Self::Video => "videos",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Video => "video",
        }
    }
}

/// Where an object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub locator: String,
    pub backend: &'static str,
}

#[derive(Clone)]
pub struct UploadGateway {
    remote: Option<Arc<dyn ObjectStore>>,
    local: Arc<dyn ObjectStore>,
    require_remote: bool,
    max_file_size: u64,
}

impl UploadGateway {
    pub fn new(
        remote: Option<Arc<dyn ObjectStore>>,
        local: Arc<dyn ObjectStore>,
        require_remote: bool,
        max_file_size: u64,
    ) -> Self {
        Self {
            remote,
            local,
            require_remote,
            max_file_size,
        }
    }

    /// Build the gateway described by `config`.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let local = LocalObjectStore::new(
            config.local_root.clone(),
            &config.public_prefix,
            config.max_file_size,
        )
        .await?;

        let remote: Option<Arc<dyn ObjectStore>> = match &config.remote {
            Some(remote) => Some(Arc::new(
                common::storage::s3::S3ObjectStore::new(remote)?,
            )),
            None if config.require_remote => {
                return Err(StorageError::NotConfigured(
                    "require_remote is set but storage.remote is missing".into(),
                ));
            }
            None => {
                info!("Remote storage not configured, uploads go to local disk");
                None
            }
        };

        Ok(Self::new(
            remote,
            Arc::new(local),
            config.require_remote,
            config.max_file_size,
        ))
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Persist `bytes` and return a locator for them.
    pub async fn store(
        &self,
        bytes: &[u8],
        filename: &str,
        kind: MediaKind,
        prefix: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        if bytes.len() as u64 > self.max_file_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: bytes.len() as u64,
                limit: self.max_file_size,
            });
        }

        let key = object_key(kind, filename, prefix);
        let content_type = mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string();

        if let Some(remote) = &self.remote {
            match remote.put(&key, bytes, &content_type).await {
                Ok(locator) => {
                    return Ok(StoredObject {
                        locator,
                        backend: remote.backend(),
                    });
                }
                Err(e) if self.require_remote => return Err(e),
                Err(e) => {
                    warn!(key = %key, error = %e, "Remote upload failed, falling back to local disk");
                }
            }
        }

        let locator = self.local.put(&key, bytes, &content_type).await?;
        Ok(StoredObject {
            locator,
            backend: self.local.backend(),
        })
    }
}

/// `[<prefix>/]<kind dir>/<uuid><.ext>`
pub fn object_key(kind: MediaKind, filename: &str, prefix: Option<&str>) -> String {
    let name = match key_extension(filename) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    };
    match prefix {
        Some(prefix) => format!("{prefix}/{}/{name}", kind.dir()),
        None => format!("{}/{name}", kind.dir()),
    }
}

/// One file received in an upload request.
pub struct IncomingFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Result of registering one file.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UploadOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Present when any part of the registration failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Store and register a batch of files.
///
/// Files are processed concurrently and reported in input order. A file
/// whose storage failure cannot fall back (size limit, required remote)
/// is reported with its error; the batch fails only when every file
/// failed that way.
pub async fn register_files(
    gateway: &UploadGateway,
    locator: &LocatorStore,
    files: Vec<IncomingFile>,
    kind: MediaKind,
    prefix: Option<&str>,
) -> Result<Vec<UploadOutcome>, StorageError> {
    let results = join_all(
        files
            .into_iter()
            .map(|file| register_file(gateway, locator, file, kind, prefix)),
    )
    .await;

    let mut outcomes = Vec::with_capacity(results.len());
    let mut first_fatal = None;
    let mut all_fatal = true;
    for registration in results {
        match registration.fatal {
            Some(e) => {
                first_fatal.get_or_insert(e);
            }
            None => all_fatal = false,
        }
        outcomes.push(registration.outcome);
    }

    match first_fatal {
        Some(e) if all_fatal => Err(e),
        _ => Ok(outcomes),
    }
}

struct Registration {
    outcome: UploadOutcome,
    /// Storage failure the gateway refused to fall back from.
    fatal: Option<StorageError>,
}

async fn register_file(
    gateway: &UploadGateway,
    locator: &LocatorStore,
    file: IncomingFile,
    kind: MediaKind,
    prefix: Option<&str>,
) -> Registration {
    let id = Uuid::new_v4().to_string();
    let (stored, content) = tokio::join!(
        gateway.store(&file.bytes, &file.filename, kind, prefix),
        locator.put_content_with_id(&id, &file.filename, &file.bytes),
    );

    let mut errors = Vec::new();
    let mut content_saved = match content {
        Ok(()) => true,
        Err(e) => {
            warn!(file_id = %id, filename = %file.filename, error = %e, "Content record write failed");
            errors.push(format!("content record: {e}"));
            false
        }
    };

    let mut url = None;
    let mut fatal = None;
    match stored {
        Ok(object) => {
            let record = UrlRecord {
                file_id: id.clone(),
                filename: file.filename.clone(),
                url: object.locator.clone(),
                kind: Some(kind.as_str().to_string()),
            };
            match locator.put_url(&record).await {
                Ok(()) => {
                    info!(file_id = %id, backend = object.backend, "File registered");
                    url = Some(object.locator);
                }
                Err(e) => {
                    warn!(file_id = %id, error = %e, "URL record write failed");
                    errors.push(format!("url record: {e}"));
                }
            }
        }
        Err(e) if gateway.require_remote || matches!(e, StorageError::SizeLimitExceeded { .. }) => {
            warn!(file_id = %id, filename = %file.filename, error = %e, "File rejected by storage");
            errors.push(format!("storage: {e}"));
            if content_saved {
                match locator.delete_content(&id).await {
                    Ok(_) => content_saved = false,
                    Err(e) => {
                        warn!(file_id = %id, error = %e, "Failed to roll back content record");
                    }
                }
            }
            fatal = Some(e);
        }
        Err(e) => {
            warn!(file_id = %id, filename = %file.filename, error = %e, "File storage failed");
            errors.push(format!("storage: {e}"));
        }
    }

    let registered = content_saved || url.is_some();
    Registration {
        outcome: UploadOutcome {
            id: registered.then_some(id),
            filename: file.filename,
            url,
            error: (!errors.is_empty()).then(|| errors.join("; ")),
        },
        fatal,
    }
}
