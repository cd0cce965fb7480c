//! Pre-flight free-space check for cross-volume walks.
//! Sums regular file sizes under the source and compares with what the
//! destination volume reports as available.

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::RelocateError;
use crate::platform::available_space;

use super::helpers::io_error_with_help;
use super::volume::nearest_existing;

/// Total bytes of regular files below `root` (links are not followed).
pub(super) fn tree_size(root: &Path) -> u128 {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len() as u128)
        .sum()
}

pub(super) fn check_disk_space(src: &Path, dest: &Path) -> Result<(), RelocateError> {
    let (_, anchor) = nearest_existing(dest).map_err(io_error_with_help("resolve destination", dest))?;
    let required = tree_size(src);
    let available = available_space(&anchor)
        .map_err(io_error_with_help("query free space", &anchor))? as u128;
    debug!(required, available, dest = %anchor.display(), "space check");
    if required > available {
        return Err(RelocateError::InsufficientSpace {
            required,
            available,
            dest: dest.to_path_buf(),
        });
    }
    Ok(())
}
