//! Safe copy-and-rename:
//! - Copies to a temp file in the destination directory (fsynced by io_copy)
//! - Carries permission bits to the temp file, and timestamps when requested
//! - Renames temp -> dest and fsyncs the destination directory (Unix)
//! - Removes the temp file if anything after its creation fails

use std::fs;
use std::path::Path;
use tracing::trace;

use crate::errors::RelocateError;

use super::helpers::io_error_with_help;
use super::{io_copy, metadata, util};

/// Copy `src` to `dest` through a temp sibling of `dest`. Returns bytes copied.
/// `dest`'s parent must already exist; `dest` itself should not.
/// Permission bits always follow the file; `preserve_times` adds atime/mtime.
pub fn safe_copy_and_rename(
    src: &Path,
    dest: &Path,
    preserve_times: bool,
) -> Result<u64, RelocateError> {
    let dest_dir = dest.parent().ok_or_else(|| RelocateError::NotADirectory(dest.to_path_buf()))?;
    let tmp_path = util::unique_temp_path(dest_dir);

    let bytes = match io_copy::copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            // A partial temp file may exist if the source failed mid-read.
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
        }
    };

    match fs::metadata(src) {
        Ok(meta) => {
            metadata::preserve_permissions(&tmp_path, &meta);
            if preserve_times {
                metadata::preserve_times(&tmp_path, &meta);
            }
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error_with_help("stat source file", src)(e));
        }
    }

    if let Err(e) = fs::rename(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }
    // The rename already succeeded; a failed directory sync must not undo that.
    let _ = util::fsync_dir(dest_dir);

    trace!(src = %src.display(), dest = %dest.display(), bytes, "copied file");
    Ok(bytes)
}
