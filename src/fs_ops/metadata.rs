//! Metadata preservation for files that had to be copied.
//! - Permission bits (Unix mode, Windows readonly) are always carried over.
//! - Timestamps (atime, mtime) only when requested.
//! - Best-effort: failures are logged and otherwise ignored.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Apply `src_meta`'s atime/mtime to `dest`.
pub(super) fn preserve_times(dest: &Path, src_meta: &fs::Metadata) {
    let (at, mt) = source_times(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }
}

/// Apply `src_meta`'s permission bits to `dest`.
pub(super) fn preserve_permissions(dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", mode), error = %e, "failed to set permissions on destination");
        }
    }

    #[cfg(windows)]
    {
        let ro = src_meta.permissions().readonly();
        match fs::metadata(dest) {
            Ok(meta) => {
                let mut perms = meta.permissions();
                perms.set_readonly(ro);
                if let Err(e) = fs::set_permissions(dest, perms) {
                    warn!(path = %dest.display(), readonly = ro, error = %e, "failed to set readonly attribute on destination");
                }
            }
            Err(e) => {
                warn!(path = %dest.display(), error = %e, "failed to stat destination for readonly preservation");
            }
        }
    }
}

#[cfg(unix)]
fn source_times(meta: &fs::Metadata) -> (FileTime, FileTime) {
    use std::os::unix::fs::MetadataExt;
    (
        FileTime::from_unix_time(meta.atime(), meta.atime_nsec() as u32),
        FileTime::from_unix_time(meta.mtime(), meta.mtime_nsec() as u32),
    )
}

#[cfg(not(unix))]
fn source_times(meta: &fs::Metadata) -> (FileTime, FileTime) {
    (
        FileTime::from_last_access_time(meta),
        FileTime::from_last_modification_time(meta),
    )
}
