use clap::Parser;
use relocate::cli::{Args, Command};
use relocate::config::types::{Config, LogLevel};
use relocate::Strategy;
use std::path::PathBuf;

#[test]
fn move_subcommand_parses_paths_and_flags() {
    let args = Args::parse_from([
        "relocate",
        "move",
        "/data/src",
        "/mnt/dst",
        "--jobs",
        "3",
        "--force-recursive",
        "--dry-run",
    ]);
    match args.command {
        Some(Command::Move {
            source,
            destination,
            jobs,
            force_recursive,
            dry_run,
            preserve_metadata,
            no_space_check,
        }) => {
            assert_eq!(source, PathBuf::from("/data/src"));
            assert_eq!(destination, PathBuf::from("/mnt/dst"));
            assert_eq!(jobs, Some(3));
            assert!(force_recursive && dry_run);
            assert!(!preserve_metadata && !no_space_check);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn zero_jobs_rejected() {
    assert!(Args::try_parse_from(["relocate", "move", "a", "b", "--jobs", "0"]).is_err());
}

#[test]
fn missing_destination_rejected() {
    assert!(Args::try_parse_from(["relocate", "move", "a"]).is_err());
}

#[test]
fn predicate_subcommands_parse() {
    let args = Args::parse_from(["relocate", "is-reparse", "/tmp/x"]);
    assert_eq!(
        args.command,
        Some(Command::IsReparse {
            path: PathBuf::from("/tmp/x")
        })
    );

    let args = Args::parse_from(["relocate", "same-path", "C:\\A", "c:\\a\\"]);
    assert_eq!(
        args.command,
        Some(Command::SamePath {
            a: PathBuf::from("C:\\A"),
            b: PathBuf::from("c:\\a\\"),
        })
    );

    let args = Args::parse_from(["relocate", "delete", "/tmp/y", "--dry-run"]);
    assert_eq!(
        args.command,
        Some(Command::Delete {
            path: PathBuf::from("/tmp/y"),
            dry_run: true
        })
    );
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["relocate", "--debug", "--log-level", "quiet", "same-path", "a", "b"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["relocate", "--log-level", "info", "same-path", "a", "b"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["relocate", "same-path", "a", "b"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn global_flags_accepted_after_subcommand() {
    let args = Args::parse_from(["relocate", "delete", "/tmp/y", "--json", "-d"]);
    assert!(args.json);
    assert!(args.debug);
}

#[test]
fn invalid_log_level_rejected() {
    assert!(Args::try_parse_from(["relocate", "--log-level", "loud", "same-path", "a", "b"]).is_err());
}

#[test]
fn apply_overrides_only_touches_set_flags() {
    let mut cfg = Config {
        log_level: LogLevel::Info,
        jobs: Some(8),
        preserve_metadata: false,
        check_space: true,
        ..Config::default()
    };
    let args = Args::parse_from(["relocate", "move", "a", "b", "--preserve-metadata", "--no-space-check"]);
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.jobs, Some(8));
    assert!(cfg.preserve_metadata);
    assert!(!cfg.check_space);
}

#[test]
fn move_options_merge_config_and_flags() {
    let mut cfg = Config::default();
    let args = Args::parse_from(["relocate", "--log-file", "/tmp/r.log", "move", "a", "b", "-j", "2", "--force-recursive"]);
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/r.log")));

    let opts = args
        .command
        .as_ref()
        .and_then(|c| c.relocate_options(&cfg))
        .expect("move yields options");
    assert_eq!(opts.strategy, Strategy::Recursive);
    assert_eq!(opts.jobs, Some(2));
    assert!(opts.check_space);
    assert!(!opts.dry_run);
}
