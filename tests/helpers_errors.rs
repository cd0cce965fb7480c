use std::io;
use std::path::Path;

use relocate::RelocateError;
use relocate::fs_ops::{io_error_with_help, io_error_with_help_io, is_cross_device};

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let err = io_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
    let msg = err.to_string();
    assert!(msg.contains("open"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"), "msg was: {msg}");
}

#[test]
fn permission_denied_is_classified() {
    let p = Path::new("/locked");
    let err = io_error_with_help("create dir", p)(io::Error::from(io::ErrorKind::PermissionDenied));
    assert!(matches!(err, RelocateError::PermissionDenied { .. }), "got {err:?}");
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
}

#[test]
fn io_variant_keeps_kind_and_source() {
    let p = Path::new("/x");
    let err = io_error_with_help("read", p)(io::Error::from(io::ErrorKind::TimedOut));
    assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    assert_eq!(err.code(), 1);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn io_flavour_preserves_kind() {
    let p = Path::new("/x");
    let err = io_error_with_help_io("write", p)(io::Error::from(io::ErrorKind::NotFound));
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert!(err.to_string().contains("write '/x'"));
}

#[cfg(unix)]
#[test]
fn enospc_hint_present() {
    let p = Path::new("/tmp");
    let err = io_error_with_help("write", p)(io::Error::from_raw_os_error(libc::ENOSPC));
    let msg = err.to_string();
    assert!(msg.contains("insufficient space"), "msg was: {msg}");
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn exdev_is_cross_device() {
    assert!(is_cross_device(&io::Error::from_raw_os_error(libc::EXDEV)));
    assert!(!is_cross_device(&io::Error::from_raw_os_error(libc::ENOENT)));
}

#[cfg(windows)]
#[test]
fn not_same_device_is_cross_device() {
    assert!(is_cross_device(&io::Error::from_raw_os_error(17)));
}
