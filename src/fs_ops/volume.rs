//! Volume identity.
//! - Unix: the device id of the entry, or of its nearest existing ancestor when
//!   the entry does not exist yet.
//! - Windows: the root prefix (drive letter or UNC share), case-folded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Identity of the storage volume a path lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VolumeId {
    /// `st_dev` of the entry.
    Device(u64),
    /// Case-folded root name, e.g. `c:` or `\\server\share`.
    Root(String),
}

/// Absolute form of `path` plus the nearest ancestor-or-self that exists.
pub(crate) fn nearest_existing(path: &Path) -> io::Result<(PathBuf, PathBuf)> {
    let abs = std::path::absolute(path)?;
    let existing = abs
        .ancestors()
        .find(|a| fs::symlink_metadata(a).is_ok())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no existing ancestor for {}", abs.display()),
            )
        })?;
    Ok((abs, existing))
}

/// Resolve the volume holding `path`.
#[cfg(unix)]
pub fn volume_of(path: &Path) -> io::Result<VolumeId> {
    use std::os::unix::fs::MetadataExt;

    let (abs, existing) = nearest_existing(path)?;
    // The entry itself is looked at without following; a missing entry lands
    // wherever its parent directory really lives.
    let meta = if existing == abs {
        fs::symlink_metadata(&existing)?
    } else {
        fs::metadata(&existing)?
    };
    Ok(VolumeId::Device(meta.dev()))
}

/// Resolve the volume holding `path`.
#[cfg(windows)]
pub fn volume_of(path: &Path) -> io::Result<VolumeId> {
    use std::path::Component;

    let abs = std::path::absolute(path)?;
    match abs.components().next() {
        Some(Component::Prefix(prefix)) => Ok(VolumeId::Root(super::path_eq::fold_case(
            &prefix.as_os_str().to_string_lossy(),
        ))),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path has no volume prefix: {}", abs.display()),
        )),
    }
}

/// Whether `a` and `b` resolve to the same volume.
pub fn same_volume(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(volume_of(a)? == volume_of(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sibling_directories_share_a_volume() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        fs::create_dir(&a).unwrap();
        let b = dir.path().join("b/does/not/exist/yet");
        assert!(same_volume(&a, &b).unwrap());
    }

    #[test]
    fn nearest_existing_walks_up() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("x/y/z");
        let (abs, existing) = nearest_existing(&missing).unwrap();
        assert_eq!(abs, missing);
        assert_eq!(existing, dir.path());
    }

    #[cfg(unix)]
    #[test]
    fn device_id_matches_metadata() {
        use std::os::unix::fs::MetadataExt;
        let dir = tempdir().unwrap();
        let expected = fs::metadata(dir.path()).unwrap().dev();
        assert_eq!(volume_of(dir.path()).unwrap(), VolumeId::Device(expected));
    }

    #[cfg(windows)]
    #[test]
    fn drive_letters_compare_case_insensitively() {
        assert_eq!(
            volume_of(Path::new(r"C:\Foo")).unwrap(),
            volume_of(Path::new(r"c:\bar")).unwrap()
        );
        assert_ne!(
            volume_of(Path::new(r"C:\Foo")).unwrap(),
            volume_of(Path::new(r"D:\Foo")).unwrap()
        );
    }
}
