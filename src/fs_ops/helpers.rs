//! I/O error helpers.
//!
//! Enrich io::Error with the operation, the path and a platform-aware hint, then
//! classify it into a RelocateError. The original io::Error is kept as the source.
//!
//! Usage:
//!   // in functions returning Result<_, RelocateError>
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;
//!
//!   // in functions returning io::Result<_>
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;

use std::io;
use std::path::Path;

use crate::errors::RelocateError;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-filesystem; rename not possible, contents must be copied)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; another process holds it)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; verify it exists)");
                }
                libc::EEXIST => {
                    msg.push_str(" (already exists; remove the target or pick another destination)");
                }
                libc::ENOTEMPTY => {
                    msg.push_str(" (directory not empty)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem; cannot write here)");
                }
                libc::ELOOP => {
                    msg.push_str(" (too many symbolic link levels; possible symlink cycle)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long)");
                }
                libc::EMFILE => {
                    msg.push_str(" (process file descriptor limit reached; lower --jobs or raise limits)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" (not same device; contents must be copied)"), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" (path not found; verify it exists)"),
                80 | 183 => msg.push_str(" (already exists; pick another destination)"),
                112 => msg.push_str(" (insufficient disk space)"), // ERROR_DISK_FULL
                145 => msg.push_str(" (directory not empty)"), // ERROR_DIR_NOT_EMPTY
                206 => msg.push_str(" (filename or path too long)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; verify it exists)");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" (already exists; remove the target or pick another destination)");
            }
            io::ErrorKind::DirectoryNotEmpty => {
                msg.push_str(" (directory not empty)");
            }
            _ => {}
        }
    }

    msg
}

/// Convert an io::Error into the matching RelocateError variant.
pub(crate) fn classify(op: &str, path: &Path, e: io::Error) -> RelocateError {
    let message = build_message(op, path, &e);
    match e.kind() {
        io::ErrorKind::PermissionDenied => RelocateError::PermissionDenied {
            path: path.to_path_buf(),
            context: message,
            source: e,
        },
        io::ErrorKind::DirectoryNotEmpty => RelocateError::NotEmpty {
            path: path.to_path_buf(),
            source: e,
        },
        _ => RelocateError::Io {
            path: path.to_path_buf(),
            message,
            source: e,
        },
    }
}

/// Adapter for `Result<_, RelocateError>` code.
/// Returns a closure suitable for `.map_err(...)`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> RelocateError + 'a {
    move |e: io::Error| classify(op, path, e)
}

/// Adapter for io::Result code: enriches the message, preserves the ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
