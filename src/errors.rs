//! Typed error definitions for relocate.
//! A small set of well-known failure modes for better logs and tests.
//!
//! Filesystem errors keep their original `io::Error` as the source; the variant
//! only classifies it so callers can branch without string matching.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Raised by the existence checks made before a move; an `AlreadyExists`
    /// reported by the OS itself stays an `Io` error with its source.
    #[error("Destination already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied {
        path: PathBuf,
        context: String,
        #[source]
        source: io::Error,
    },

    /// The walk tried to remove a source directory that still had entries.
    /// This is a fault in the relocation itself, not a user error.
    #[error("Directory still has entries after draining: {path}: {source}")]
    NotEmpty {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination '{dest}' is inside source '{src}'")]
    DestinationInsideSource { src: PathBuf, dest: PathBuf },

    #[error("Insufficient disk space for destination {dest}: need {required} bytes, have {available} bytes")]
    InsufficientSpace {
        required: u128,
        available: u128,
        dest: PathBuf,
    },

    #[error("Operation interrupted by user")]
    Cancelled,

    #[error("{message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },
}

impl RelocateError {
    /// Stable numeric code for structured logs and process exit status.
    pub fn code(&self) -> i32 {
        match self {
            RelocateError::Io { .. } => 1,
            RelocateError::SourceNotFound(_) => 2,
            RelocateError::NotADirectory(_) => 3,
            RelocateError::AlreadyExists(_) => 4,
            RelocateError::PermissionDenied { .. } => 5,
            RelocateError::NotEmpty { .. } => 6,
            RelocateError::DestinationInsideSource { .. } => 7,
            RelocateError::InsufficientSpace { .. } => 8,
            RelocateError::Cancelled => 130,
        }
    }

    /// The closest `io::ErrorKind` for this failure.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            RelocateError::SourceNotFound(_) => io::ErrorKind::NotFound,
            RelocateError::NotADirectory(_) => io::ErrorKind::NotADirectory,
            RelocateError::AlreadyExists(_) => io::ErrorKind::AlreadyExists,
            RelocateError::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
            RelocateError::NotEmpty { .. } => io::ErrorKind::DirectoryNotEmpty,
            RelocateError::DestinationInsideSource { .. } => io::ErrorKind::InvalidInput,
            RelocateError::InsufficientSpace { .. } => io::ErrorKind::StorageFull,
            RelocateError::Cancelled => io::ErrorKind::Interrupted,
            RelocateError::Io { source, .. } => source.kind(),
        }
    }

    /// Short machine-friendly label used as the `kind` field in logs.
    pub fn label(&self) -> &'static str {
        match self {
            RelocateError::SourceNotFound(_) => "source_not_found",
            RelocateError::NotADirectory(_) => "not_a_directory",
            RelocateError::AlreadyExists(_) => "already_exists",
            RelocateError::PermissionDenied { .. } => "permission_denied",
            RelocateError::NotEmpty { .. } => "not_empty",
            RelocateError::DestinationInsideSource { .. } => "destination_inside_source",
            RelocateError::InsufficientSpace { .. } => "insufficient_space",
            RelocateError::Cancelled => "cancelled",
            RelocateError::Io { .. } => "io",
        }
    }
}
