//! CLI definition and parsing.
//! Defines Args (global flags + subcommands) and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug and wins over --log-level.
//! - Flags left unset keep the value loaded from the XML config.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::{RelocateOptions, Strategy};

/// Move, delete and inspect directory trees across volumes.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Relocate directory trees across volumes, delete trees and inspect links"
)]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, value_parser = parse_log_level, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Append logs to this file in addition to stdout.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where relocate will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by relocate and exit")]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move a directory tree to a new location (rename, or copy+delete across volumes).
    Move {
        #[arg(value_name = "SOURCE", value_hint = ValueHint::DirPath)]
        source: PathBuf,

        #[arg(value_name = "DESTINATION", value_hint = ValueHint::DirPath)]
        destination: PathBuf,

        /// Worker threads for per-directory file batches (default: one per CPU).
        #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
        jobs: Option<u16>,

        /// Walk the tree even when a rename would do.
        #[arg(long)]
        force_recursive: bool,

        /// Also preserve timestamps on copied files (permissions are always kept); slower.
        #[arg(long)]
        preserve_metadata: bool,

        /// Skip the free-space check before a cross-volume walk.
        #[arg(long)]
        no_space_check: bool,

        /// Show what would be done, but do not modify files/directories.
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a directory tree; a link or junction is removed without touching its target.
    Delete {
        #[arg(value_name = "PATH", value_hint = ValueHint::AnyPath)]
        path: PathBuf,

        /// Report what would be removed without removing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print `true` if PATH is a symbolic link or junction, else `false`.
    IsReparse {
        #[arg(value_name = "PATH", value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },

    /// Print `true` if A and B name the same location (case-insensitive), else `false`.
    SamePath {
        #[arg(value_name = "A", value_hint = ValueHint::AnyPath)]
        a: PathBuf,
        #[arg(value_name = "B", value_hint = ValueHint::AnyPath)]
        b: PathBuf,
    },
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if let Some(Command::Move {
            jobs,
            preserve_metadata,
            no_space_check,
            ..
        }) = &self.command
        {
            if let Some(n) = jobs {
                cfg.jobs = Some(usize::from(*n));
            }
            if *preserve_metadata {
                cfg.preserve_metadata = true;
            }
            if *no_space_check {
                cfg.check_space = false;
            }
        }
    }
}

impl Command {
    /// Relocation options for `move`, starting from the merged config.
    /// Returns None for other subcommands.
    pub fn relocate_options(&self, cfg: &Config) -> Option<RelocateOptions> {
        match self {
            Command::Move {
                force_recursive,
                dry_run,
                ..
            } => {
                let mut opts = cfg.relocate_options();
                if *force_recursive {
                    opts.strategy = Strategy::Recursive;
                }
                opts.dry_run = *dry_run;
                Some(opts)
            }
            _ => None,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
