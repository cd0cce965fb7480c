use std::fs;
use std::io;
use std::path::Path;

use crate::platform::has_reparse_attribute;

/// Whether `path` is a reparse point (symbolic link, junction, mount point).
/// The link itself is inspected, never its target. A missing path is an error.
pub fn is_reparse_point(path: impl AsRef<Path>) -> io::Result<bool> {
    let meta = fs::symlink_metadata(path.as_ref())?;
    Ok(has_reparse_attribute(&meta))
}
