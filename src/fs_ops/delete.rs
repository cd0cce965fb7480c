//! Tree deletion that stops at reparse points.
//! A link/junction is removed as an entry; whatever it points at is left alone.

use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use crate::errors::RelocateError;
use crate::platform::{has_reparse_attribute, remove_link};

use super::helpers::io_error_with_help;

/// Delete the directory at `path` and, unless it is a reparse point, its contents.
pub fn delete_tree(path: impl AsRef<Path>) -> Result<(), RelocateError> {
    let path = path.as_ref();
    let meta = fs::symlink_metadata(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            RelocateError::SourceNotFound(path.to_path_buf())
        } else {
            io_error_with_help("stat", path)(e)
        }
    })?;

    if has_reparse_attribute(&meta) {
        remove_link(path).map_err(io_error_with_help("remove link", path))?;
        info!(path = %path.display(), "Removed reparse point; target left intact");
        return Ok(());
    }

    if !meta.is_dir() {
        return Err(RelocateError::NotADirectory(path.to_path_buf()));
    }

    // remove_dir_all does not descend into links found below `path`.
    fs::remove_dir_all(path).map_err(io_error_with_help("remove directory tree", path))?;
    info!(path = %path.display(), "Removed directory tree");
    Ok(())
}
