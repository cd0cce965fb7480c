//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! and dispatches the selected subcommand.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use relocate::cli::{Args, Command};
use relocate::output as out;
use relocate::{
    Config, RelocateError, default_config_path, delete_tree, is_reparse_point, load_config,
    Strategy, relocate as relocate_tree, same_path, shutdown,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        anyhow::bail!("no subcommand given; try `relocate --help`");
    };

    // Build config (may read XML). CLI args override config values.
    let mut cfg = match load_config()? {
        Some((_, cfg)) => cfg,
        None => Config::default(),
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("initialize logging")?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing in-flight files then stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install signal handler")?;
    }

    debug!(?command, ?cfg, "Starting relocate");

    let result = dispatch(&command, &cfg);
    if let Err(e) = &result {
        log_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result.map_err(anyhow::Error::from)
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(relocate::config::CONFIG_ENV) {
        out::print_info(&format!("Using RELOCATE_CONFIG (explicit):\n  {cfg_env}\n"));
        out::print_info("To override, unset RELOCATE_CONFIG or set it to another file.");
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default relocate config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used. Example:\n\n<config>\n  <log_level>normal</log_level>\n  <log_file>/path/to/relocate.log</log_file>\n  <jobs>4</jobs>\n  <preserve_metadata>false</preserve_metadata>\n  <check_space>true</check_space>\n</config>\n");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

fn dispatch(command: &Command, cfg: &Config) -> Result<(), RelocateError> {
    match command {
        Command::Move {
            source,
            destination,
            ..
        } => {
            let Some(opts) = command.relocate_options(cfg) else {
                return Ok(());
            };
            let done = relocate_tree(source, destination, &opts)?;
            if opts.dry_run {
                out::print_info(&format!(
                    "Dry-run: would {} '{}' -> '{}' ({} files, {} directories)",
                    if done.strategy == Strategy::Rename {
                        "rename"
                    } else {
                        "copy+delete"
                    },
                    source.display(),
                    done.destination.display(),
                    done.files_moved,
                    done.dirs_removed
                ));
            } else {
                info!(
                    source = %source.display(),
                    dest = %done.destination.display(),
                    strategy = ?done.strategy,
                    files = done.files_moved,
                    dirs = done.dirs_removed,
                    "Move completed"
                );
                out::print_user(&format!(
                    "Moved '{}' -> '{}'",
                    source.display(),
                    done.destination.display()
                ));
            }
            Ok(())
        }
        Command::Delete { path, dry_run } => {
            if *dry_run {
                describe_delete(path)?;
                return Ok(());
            }
            delete_tree(path)?;
            info!(path = %path.display(), "Delete completed");
            out::print_success(&format!("Deleted '{}'", path.display()));
            Ok(())
        }
        Command::IsReparse { path } => {
            let answer = is_reparse_point(path)
                .map_err(relocate::fs_ops::io_error_with_help("inspect", path))?;
            out::print_answer(answer);
            Ok(())
        }
        Command::SamePath { a, b } => {
            out::print_answer(same_path(a, b));
            Ok(())
        }
    }
}

fn describe_delete(path: &Path) -> Result<(), RelocateError> {
    let meta = std::fs::symlink_metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RelocateError::SourceNotFound(path.to_path_buf())
        } else {
            relocate::fs_ops::io_error_with_help("stat", path)(e)
        }
    })?;
    let link = is_reparse_point(path).map_err(relocate::fs_ops::io_error_with_help("inspect", path))?;
    if link {
        out::print_info(&format!("Dry-run: would remove link '{}' (target untouched)", path.display()));
    } else if meta.is_dir() {
        out::print_info(&format!("Dry-run: would delete tree '{}'", path.display()));
    } else {
        return Err(RelocateError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

fn log_failure(e: &RelocateError) {
    let code = e.code();
    let kind = e.label();
    match e {
        RelocateError::SourceNotFound(path) | RelocateError::NotADirectory(path) => {
            error!(code, kind, path = %path.display(), "Operation failed")
        }
        RelocateError::AlreadyExists(path) => {
            error!(code, kind, path = %path.display(), "Destination already exists")
        }
        RelocateError::PermissionDenied { path, context, .. } => {
            error!(code, kind, path = %path.display(), %context, "Operation failed")
        }
        RelocateError::NotEmpty { path, source } => {
            error!(code, kind, path = %path.display(), error = %source, "Source directory not drained")
        }
        RelocateError::DestinationInsideSource { src, dest } => {
            error!(code, kind, src = %src.display(), dest = %dest.display(), "Operation failed")
        }
        RelocateError::InsufficientSpace {
            required,
            available,
            dest,
        } => {
            error!(code, kind, required = %required, available = %available, dest = %dest.display(), "Operation failed")
        }
        RelocateError::Cancelled => error!(code, kind, "Operation aborted by user"),
        RelocateError::Io { path, source, .. } => {
            error!(code, kind, path = %path.display(), error = %source, "Operation failed")
        }
    }
}
