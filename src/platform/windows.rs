//! Windows implementations of platform helpers.
//!
//! Notes:
//! - Reparse points (symlinks, junctions, mount points) are detected through
//!   FILE_ATTRIBUTE_REPARSE_POINT on the non-following metadata.
//! - A directory link is removed with RemoveDirectory, a file link with DeleteFile.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::windows::ffi::OsStrExt;
use std::os::windows::fs::MetadataExt;
use std::path::Path;

use windows_sys::Win32::Storage::FileSystem::{
    FILE_ATTRIBUTE_DIRECTORY, FILE_ATTRIBUTE_REPARSE_POINT, GetDiskFreeSpaceExW,
};

/// Open log file for appending (no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `meta` must come from `symlink_metadata`.
pub fn has_reparse_attribute(meta: &fs::Metadata) -> bool {
    meta.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT != 0
}

fn is_directory_entry(meta: &fs::Metadata) -> bool {
    meta.file_attributes() & FILE_ATTRIBUTE_DIRECTORY != 0
}

/// Remove a link entry without touching what it points to.
pub fn remove_link(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if is_directory_entry(&meta) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

/// Create at `dest` a link with the same target as the link at `src`.
/// Junctions come back as directory symlinks.
pub fn recreate_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(src)?;
    let target = fs::read_link(src)?;
    if is_directory_entry(&meta) {
        std::os::windows::fs::symlink_dir(target, dest)
    } else {
        std::os::windows::fs::symlink_file(target, dest)
    }
}

/// Bytes available to the caller on the volume holding `path`.
pub fn available_space(path: &Path) -> io::Result<u64> {
    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
    let mut free_to_caller: u64 = 0;
    // SAFETY: `wide` is NUL-terminated; null out-pointers are permitted by the API.
    let ok = unsafe {
        GetDiskFreeSpaceExW(
            wide.as_ptr(),
            &mut free_to_caller,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        )
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(free_to_caller)
}
