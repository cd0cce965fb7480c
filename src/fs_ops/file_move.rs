//! Single-entry move used by the directory walk.
//! Attempts a rename; on a cross-filesystem error falls back to a safe
//! copy+rename and then removes the source. Links are moved as links;
//! other special files (FIFOs, sockets, devices) are refused on the copy path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::RelocateError;
use crate::platform::{has_reparse_attribute, recreate_symlink, remove_link};

use super::copy::safe_copy_and_rename;
use super::helpers::io_error_with_help;
use super::util::is_cross_device;

/// How an individual entry should be transferred.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct FileMoveOptions {
    pub preserve_metadata: bool,
    /// Skip the rename attempt and always copy+delete.
    pub force_copy: bool,
}

/// Move the non-directory entry `src` into `dest_dir`, keeping its name.
pub(super) fn move_into(
    src: &Path,
    dest_dir: &Path,
    opts: FileMoveOptions,
) -> Result<PathBuf, RelocateError> {
    let name = src
        .file_name()
        .ok_or_else(|| RelocateError::NotADirectory(src.to_path_buf()))?;
    let dest = dest_dir.join(name);
    move_entry(src, &dest, opts)?;
    Ok(dest)
}

fn move_entry(src: &Path, dest: &Path, opts: FileMoveOptions) -> Result<(), RelocateError> {
    // Existing entries are never replaced.
    if fs::symlink_metadata(dest).is_ok() {
        return Err(RelocateError::AlreadyExists(dest.to_path_buf()));
    }

    if !opts.force_copy {
        match fs::rename(src, dest) {
            Ok(()) => {
                trace!(src = %src.display(), dest = %dest.display(), "renamed entry");
                return Ok(());
            }
            Err(e) if is_cross_device(&e) => {
                debug!(src = %src.display(), error = %e, "rename crosses filesystems; copying instead");
            }
            Err(e) => return Err(io_error_with_help("rename entry", src)(e)),
        }
    }

    let meta = fs::symlink_metadata(src).map_err(io_error_with_help("stat entry", src))?;
    if has_reparse_attribute(&meta) {
        recreate_symlink(src, dest).map_err(io_error_with_help("recreate link", dest))?;
        remove_link(src).map_err(io_error_with_help("remove original link", src))?;
    } else if !meta.is_file() {
        // FIFOs, sockets and device nodes cannot be streamed; opening a FIFO would block.
        return Err(io_error_with_help("copy special file", src)(io::Error::new(
            io::ErrorKind::Unsupported,
            "not a regular file or link; only a same-volume rename can move it",
        )));
    } else {
        safe_copy_and_rename(src, dest, opts.preserve_metadata)?;
        fs::remove_file(src).map_err(io_error_with_help("remove original after copy", src))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rename_path_moves_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(&src, b"hello").unwrap();

        let dest = move_into(&src, &out, FileMoveOptions::default()).unwrap();
        assert_eq!(dest, out.join("a.txt"));
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"hello");
    }

    #[test]
    fn forced_copy_moves_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("b.bin");
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(&src, b"\x00\x01\x02").unwrap();

        let opts = FileMoveOptions {
            force_copy: true,
            ..Default::default()
        };
        let dest = move_into(&src, &out, opts).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"\x00\x01\x02");
    }

    #[test]
    fn existing_destination_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("c.txt");
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(&src, b"new").unwrap();
        fs::write(out.join("c.txt"), b"old").unwrap();

        let err = move_into(&src, &out, FileMoveOptions::default()).unwrap_err();
        assert!(matches!(err, RelocateError::AlreadyExists(_)));
        assert_eq!(fs::read(out.join("c.txt")).unwrap(), b"old");
        assert!(src.exists());
    }

    #[cfg(unix)]
    #[test]
    fn forced_copy_keeps_links_as_links() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target.txt");
        fs::write(&target, b"t").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let opts = FileMoveOptions {
            force_copy: true,
            ..Default::default()
        };
        let dest = move_into(&link, &out, opts).unwrap();
        assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&dest).unwrap(), target);
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.exists());
    }

    #[cfg(unix)]
    #[test]
    fn forced_copy_refuses_fifo() {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;
        use std::os::unix::fs::FileTypeExt;

        let dir = tempdir().unwrap();
        let fifo = dir.path().join("pipe");
        let c = CString::new(fifo.as_os_str().as_bytes()).unwrap();
        assert_eq!(unsafe { libc::mkfifo(c.as_ptr(), 0o600) }, 0);
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let opts = FileMoveOptions {
            force_copy: true,
            ..Default::default()
        };
        let err = move_into(&fifo, &out, opts).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert!(fs::symlink_metadata(&fifo).unwrap().file_type().is_fifo());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }
}
