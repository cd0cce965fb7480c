//! Core library for `relocate`.
//!
//! Moves a directory tree from one location to another, even across volumes:
//! a same-volume move is a single rename; otherwise the tree is drained
//! bottom-up (files moved in parallel per directory, then subdirectories,
//! then the emptied source directory removed). Also provides link-aware tree
//! deletion, reparse-point detection and case-insensitive path comparison.
//!
//! Modules:
//! - errors: typed error enum with stable codes
//! - fs_ops: relocation, deletion and the filesystem helpers behind them
//! - platform: OS-specific primitives (links, free space, log file opening)
//! - config: configuration types, default paths and XML loading
//! - cli: clap definitions used by the binary
//! - output: colored user-facing lines
//! - shutdown: cooperative cancellation flag

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{
    Config, LogLevel, default_config_path, load_config, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use errors::RelocateError;
pub use fs_ops::{
    RelocateOptions, Relocation, Strategy, VolumeId, delete_tree, is_reparse_point, relocate,
    same_path, same_volume,
};
