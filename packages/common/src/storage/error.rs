use std::fmt;
use std::time::Duration;

/// Errors that can occur during object storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The backend is missing required configuration.
    NotConfigured(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The object key is empty or escapes the storage root.
    InvalidKey(String),
    /// The remote service rejected or failed the request.
    Remote(String),
    /// A single attempt did not finish in time.
    Timeout(Duration),
    /// The object exceeds the configured size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured(msg) => write!(f, "storage not configured: {msg}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::InvalidKey(key) => write!(f, "invalid object key: {key}"),
            Self::Remote(msg) => write!(f, "remote storage error: {msg}"),
            Self::Timeout(after) => write!(f, "storage request timed out after {after:?}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "object exceeds size limit ({actual} > {limit} bytes)")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
