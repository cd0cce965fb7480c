//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{
    available_space, has_reparse_attribute, open_log_file_secure_append, recreate_symlink,
    remove_link,
};

#[cfg(windows)]
pub use windows::{
    available_space, has_reparse_attribute, open_log_file_secure_append, recreate_symlink,
    remove_link,
};
