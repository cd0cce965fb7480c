//! Filesystem operations: modularized.

mod copy;
mod delete;
mod file_move;
mod helpers;
mod io_copy;
mod metadata;
mod path_eq;
mod relocate;
mod reparse;
mod space;
mod util;
mod volume;

pub use copy::safe_copy_and_rename;
pub use delete::delete_tree;
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use path_eq::same_path;
pub use relocate::{RelocateOptions, Relocation, Strategy, relocate};
pub use reparse::is_reparse_point;
pub use util::is_cross_device;
pub use volume::{VolumeId, same_volume, volume_of};
