//! Error types for cache operations.

use std::path::PathBuf;

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error type for cache operations.
///
/// Filesystem failures carry the failing path, the operation that was
/// attempted, and the underlying `io::Error` as the source, so callers
/// can inspect the cause without the cache interpreting or retrying it.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O failure during a cache operation
    #[error("file system {operation} failed for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The configured root path exists but is not a directory
    #[error("invalid cache directory '{}': {reason}", path.display())]
    InvalidDirectory { path: PathBuf, reason: String },

    /// Configuration errors at construction time
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl CacheError {
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_preserves_source() {
        let err = CacheError::io(
            "/some/path",
            "create directory",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        let rendered = err.to_string();
        assert!(rendered.contains("create directory"));
        assert!(rendered.contains("/some/path"));
    }

    #[test]
    fn test_invalid_directory_display() {
        let err = CacheError::InvalidDirectory {
            path: PathBuf::from("/etc/passwd"),
            reason: "path exists and is not a directory".to_string(),
        };
        assert!(err.to_string().contains("/etc/passwd"));
    }
}
