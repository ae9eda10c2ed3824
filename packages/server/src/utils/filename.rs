use std::path::Path;

/// Result of validating a flat filename.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename contains path traversal patterns (`..`).
    PathTraversal,
    /// Filename contains null bytes.
    NullByte,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
    /// Filename exceeds 255 bytes.
    TooLong,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::TooLong => "Invalid filename: at most 255 bytes are allowed",
        }
    }
}

/// Filename used when the client sends none.
pub const FALLBACK_FILENAME: &str = "file";

/// Validates a client-supplied upload filename.
///
/// Missing or blank names fall back to [`FALLBACK_FILENAME`]; anything with
/// directory components or control characters is rejected.
pub fn upload_filename(raw: Option<&str>) -> Result<String, FilenameError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(FALLBACK_FILENAME.to_string());
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // Reject ASCII control characters to prevent
    // HTTP header injection (e.g. CRLF in Content-Disposition).
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    if trimmed.len() > 255 {
        return Err(FilenameError::TooLong);
    }

    Ok(trimmed.to_string())
}

/// Lowercased extension suitable for an object key, e.g. `"png"`.
///
/// Returns `None` for names without an extension or with characters
/// outside `[a-z0-9]`.
pub fn key_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    let ext = ext.to_ascii_lowercase();
    let valid = !ext.is_empty()
        && ext.len() <= 10
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(ext)
}

/// Validates an optional key prefix such as `"campaigns/2024"`.
pub fn validate_key_prefix(prefix: &str) -> Result<String, &'static str> {
    let trimmed = prefix.trim().trim_matches('/');

    if trimmed.is_empty() {
        return Err("Folder cannot be empty");
    }

    if trimmed.len() > 128 {
        return Err("Folder exceeds maximum length of 128 characters");
    }

    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err("Folder must not contain empty segments");
        }
        if segment.starts_with('.') {
            return Err("Folder segments must not start with '.'");
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Err("Folder contains invalid characters (allowed: a-zA-Z0-9, /, -, _)");
        }
    }

    Ok(trimmed.to_string())
}
