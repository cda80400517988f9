//! Error types for tree building and content resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::address::Address;

/// Errors that abort a navigation tree build.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive could not be opened or enumerated.
    #[error("Unreadable archive {path}: {message}")]
    Archive { path: PathBuf, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an archive error with path context.
    pub fn archive(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Archive {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Text that cannot be shown as a JSON tree.
///
/// Syntax errors and a top level that is neither an object nor an array are
/// reported the same way.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document failed to parse as a JSON object or array.
    #[error("Malformed JSON document: {message}")]
    Malformed { message: String },
}

impl DocumentError {
    /// Create a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Errors reading the content behind an address.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The archive has no entry with the addressed name.
    #[error("Unresolved address: {address}")]
    UnresolvedAddress { address: Address },

    /// File or archive could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive could not be opened or the entry could not be decompressed.
    #[error("Unreadable archive {path}: {message}")]
    Archive { path: PathBuf, message: String },

    /// Archive entry is larger than the in-memory read limit.
    #[error("Entry at {address} is too large ({size} bytes)")]
    TooLarge { address: Address, size: u64 },

    /// Content is not valid UTF-8 text.
    #[error("Content at {address} is not UTF-8 text")]
    NotText { address: Address },
}

impl ResolveError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an archive error with path context.
    pub fn archive(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Archive {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert!(matches!(err, ScanError::Io { .. }));
    }

    #[test]
    fn test_error_messages() {
        let err = ScanError::archive("/r/y.zip", "invalid Zip archive");
        assert_eq!(err.to_string(), "Unreadable archive /r/y.zip: invalid Zip archive");

        let err = ResolveError::UnresolvedAddress {
            address: Address::archive_entry("/r/y.zip", "gone.json"),
        };
        assert_eq!(err.to_string(), "Unresolved address: zip:/r/y.zip,gone.json");

        let err = DocumentError::malformed("EOF while parsing");
        assert!(err.to_string().starts_with("Malformed JSON document"));
    }
}
