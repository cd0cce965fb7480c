//! Directory relocation.
//!
//! Same volume: one rename, atomic, fails as a unit.
//! Different volumes: a post-order walk. For each directory the destination is
//! created, its files are moved as a parallel batch, its subdirectories are
//! relocated one after another, and only then is the drained source directory
//! removed. A failure stops the walk where it is; nothing is rolled back.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::RelocateError;
use crate::shutdown;

use super::file_move::{FileMoveOptions, move_into};
use super::helpers::io_error_with_help;
use super::space::check_disk_space;
use super::util::is_cross_device;
use super::volume::{nearest_existing, same_volume};

/// How the tree is moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Rename when both paths share a volume, walk otherwise.
    #[default]
    Auto,
    /// Always a single rename.
    Rename,
    /// Always the recursive walk.
    Recursive,
}

/// Knobs for [`relocate`].
#[derive(Debug, Clone)]
pub struct RelocateOptions {
    pub strategy: Strategy,
    /// Worker threads for per-directory file batches; `None` uses rayon's global pool.
    pub jobs: Option<usize>,
    /// Also copy timestamps onto files that had to be copied (permission bits always follow).
    pub preserve_metadata: bool,
    /// Copy every file even when a rename would work (exercises the cross-volume path).
    pub force_copy: bool,
    /// Refuse a walk up front when the destination volume is too small.
    pub check_space: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

impl Default for RelocateOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            jobs: None,
            preserve_metadata: false,
            force_copy: false,
            check_space: true,
            dry_run: false,
        }
    }
}

/// Outcome of a relocation. Counts describe the walk; a rename reports zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub destination: PathBuf,
    /// `Rename` or `Recursive`, never `Auto`.
    pub strategy: Strategy,
    pub files_moved: u64,
    pub dirs_removed: u64,
}

#[derive(Default)]
struct Counters {
    files: AtomicU64,
    dirs: AtomicU64,
}

/// Move the directory `source` to `destination`, possibly across volumes.
pub fn relocate(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    opts: &RelocateOptions,
) -> Result<Relocation, RelocateError> {
    let src = source.as_ref();
    let dest = destination.as_ref();

    if shutdown::is_requested() {
        return Err(RelocateError::Cancelled);
    }

    let meta = fs::symlink_metadata(src).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            RelocateError::SourceNotFound(src.to_path_buf())
        } else {
            io_error_with_help("stat source", src)(e)
        }
    })?;
    if !meta.is_dir() {
        return Err(RelocateError::NotADirectory(src.to_path_buf()));
    }
    ensure_not_nested(src, dest)?;

    let strategy = match opts.strategy {
        Strategy::Auto => {
            if same_volume(src, dest).map_err(io_error_with_help("resolve volume", dest))? {
                Strategy::Rename
            } else {
                Strategy::Recursive
            }
        }
        explicit => explicit,
    };
    debug!(src = %src.display(), dest = %dest.display(), ?strategy, "relocation strategy");

    if opts.dry_run {
        return Ok(plan(src, dest, strategy));
    }

    if strategy == Strategy::Rename {
        match rename_tree(src, dest) {
            Ok(()) => {
                info!(src = %src.display(), dest = %dest.display(), "Renamed directory atomically");
                return Ok(Relocation {
                    destination: dest.to_path_buf(),
                    strategy,
                    files_moved: 0,
                    dirs_removed: 0,
                });
            }
            Err(RenameError::CrossDevice(e)) => {
                warn!(error = %e, "Directory rename crosses filesystems; walking the tree instead");
            }
            Err(RenameError::Fatal(e)) => return Err(e),
        }
    }

    relocate_recursive(src, dest, opts)
}

enum RenameError {
    CrossDevice(io::Error),
    Fatal(RelocateError),
}

fn rename_tree(src: &Path, dest: &Path) -> Result<(), RenameError> {
    if fs::symlink_metadata(dest).is_ok() {
        return Err(RenameError::Fatal(RelocateError::AlreadyExists(dest.to_path_buf())));
    }
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| RenameError::Fatal(io_error_with_help("create destination parent", parent)(e)))?;
    }
    fs::rename(src, dest).map_err(|e| {
        if is_cross_device(&e) {
            RenameError::CrossDevice(e)
        } else {
            RenameError::Fatal(io_error_with_help("rename directory", src)(e))
        }
    })
}

fn relocate_recursive(
    src: &Path,
    dest: &Path,
    opts: &RelocateOptions,
) -> Result<Relocation, RelocateError> {
    // Renames inside one volume need no extra room; only copies are measured.
    let renames_in_place = !opts.force_copy && matches!(same_volume(src, dest), Ok(true));
    if opts.check_space && !renames_in_place {
        check_disk_space(src, dest)?;
    } else if opts.check_space {
        debug!(src = %src.display(), "same volume; skipping space check");
    }

    let counters = Counters::default();
    let file_opts = FileMoveOptions {
        preserve_metadata: opts.preserve_metadata,
        force_copy: opts.force_copy,
    };
    let walk = || relocate_dir(src, dest, file_opts, &counters);

    match opts.jobs {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n.max(1))
                .thread_name(|i| format!("relocate-{i}"))
                .build()
                .map_err(|e| RelocateError::Io {
                    path: src.to_path_buf(),
                    message: format!("build worker pool: {e}"),
                    source: io::Error::other(e),
                })?;
            pool.install(walk)?;
        }
        None => walk()?,
    }

    let relocation = Relocation {
        destination: dest.to_path_buf(),
        strategy: Strategy::Recursive,
        files_moved: counters.files.into_inner(),
        dirs_removed: counters.dirs.into_inner(),
    };
    info!(
        src = %src.display(),
        dest = %dest.display(),
        files = relocation.files_moved,
        dirs = relocation.dirs_removed,
        "Moved directory tree and removed source"
    );
    Ok(relocation)
}

/// Post-order step for one directory. The final `remove_dir` is the join point:
/// it runs only after every file and every subdirectory below has been handled.
fn relocate_dir(
    src: &Path,
    dest: &Path,
    opts: FileMoveOptions,
    counters: &Counters,
) -> Result<(), RelocateError> {
    if shutdown::is_requested() {
        return Err(RelocateError::Cancelled);
    }

    ensure_dir(dest)?;
    let (files, dirs) = list_children(src)?;

    files.par_iter().try_for_each(|file| -> Result<(), RelocateError> {
        move_into(file, dest, opts)?;
        counters.files.fetch_add(1, Ordering::Relaxed);
        Ok(())
    })?;

    for sub in &dirs {
        if shutdown::is_requested() {
            return Err(RelocateError::Cancelled);
        }
        let Some(name) = sub.file_name() else { continue };
        relocate_dir(sub, &dest.join(name), opts, counters)?;
    }

    fs::remove_dir(src).map_err(io_error_with_help("remove drained directory", src))?;
    counters.dirs.fetch_add(1, Ordering::Relaxed);
    debug!(src = %src.display(), dest = %dest.display(), files = files.len(), "directory drained");
    Ok(())
}

/// Create `dest` if needed; an existing non-directory entry is a collision.
fn ensure_dir(dest: &Path) -> Result<(), RelocateError> {
    match fs::symlink_metadata(dest) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(RelocateError::AlreadyExists(dest.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dest).map_err(io_error_with_help("create destination directory", dest))
        }
        Err(e) => Err(io_error_with_help("stat destination", dest)(e)),
    }
}

/// Immediate children split into (non-directories, real directories), in
/// enumeration order. Links to directories count as non-directories.
fn list_children(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), RelocateError> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| io_error_with_help("list directory", dir)(e.into()))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        } else {
            files.push(entry.into_path());
        }
    }
    Ok((files, dirs))
}

/// Reject a destination equal to or below the source.
fn ensure_not_nested(src: &Path, dest: &Path) -> Result<(), RelocateError> {
    let src_real = dunce::canonicalize(src).map_err(io_error_with_help("resolve source", src))?;
    let (abs, existing) = nearest_existing(dest).map_err(io_error_with_help("resolve destination", dest))?;
    let existing_real =
        dunce::canonicalize(&existing).map_err(io_error_with_help("resolve destination", &existing))?;
    let rest = abs.strip_prefix(&existing).unwrap_or(Path::new(""));
    let dest_real = existing_real.join(rest);

    if dest_real.starts_with(&src_real) {
        return Err(RelocateError::DestinationInsideSource {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }
    Ok(())
}

fn plan(src: &Path, dest: &Path, strategy: Strategy) -> Relocation {
    let (files_moved, dirs_removed) = match strategy {
        Strategy::Recursive => WalkDir::new(src)
            .into_iter()
            .filter_map(Result::ok)
            .fold((0u64, 0u64), |(f, d), e| {
                if e.file_type().is_dir() { (f, d + 1) } else { (f + 1, d) }
            }),
        _ => (0, 0),
    };
    info!(src = %src.display(), dest = %dest.display(), ?strategy, files_moved, dirs_removed, "dry-run: would relocate directory");
    Relocation {
        destination: dest.to_path_buf(),
        strategy,
        files_moved,
        dirs_removed,
    }
}
