//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::{RelocateOptions, Strategy};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Worker threads for file batches (None = one per CPU)
    pub jobs: Option<usize>,
    /// Preserve timestamps on copied files (permissions are always kept)
    pub preserve_metadata: bool,
    /// Check free space before a cross-volume walk
    pub check_space: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            log_file: None,
            jobs: None,
            preserve_metadata: false,
            check_space: true,
        }
    }
}

impl Config {
    /// Relocation options derived from this config; per-call switches
    /// (strategy, dry-run, forced copy) start at their defaults.
    pub fn relocate_options(&self) -> RelocateOptions {
        RelocateOptions {
            strategy: Strategy::Auto,
            jobs: self.jobs,
            preserve_metadata: self.preserve_metadata,
            check_space: self.check_space,
            ..RelocateOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loglevel_aliases() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse(" verbose "), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
        assert_eq!("normal".parse::<LogLevel>(), Ok(LogLevel::Normal));
    }

    #[test]
    fn options_follow_config() {
        let cfg = Config {
            jobs: Some(2),
            preserve_metadata: true,
            check_space: false,
            ..Config::default()
        };
        let opts = cfg.relocate_options();
        assert_eq!(opts.jobs, Some(2));
        assert!(opts.preserve_metadata);
        assert!(!opts.check_space);
        assert_eq!(opts.strategy, Strategy::Auto);
        assert!(!opts.dry_run);
    }
}
