//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition can be
//! composed into several commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

use crate::config::CONFIG_ENV;

/// Pattern to compile (positional).
pub fn pattern_arg() -> Arg {
    Arg::new("pattern")
        .value_name("PATTERN")
        .help("Pattern to compile (defaults to the configured pattern)")
}

/// JSON automaton description (--dfa).
pub fn dfa_arg() -> Arg {
    Arg::new("dfa")
        .long("dfa")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("pattern")
        .help("Read the automaton from a JSON description (use \"-\" for stdin)")
}

/// Match anywhere in the input (--unanchored).
pub fn unanchored_arg() -> Arg {
    Arg::new("unanchored")
        .long("unanchored")
        .action(ArgAction::SetTrue)
        .help("Let the pattern start anywhere in the input")
}

/// State count limit (--max-states).
pub fn max_states_arg() -> Arg {
    Arg::new("max_states")
        .long("max-states")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Reject automata with more reachable states than N")
}

/// Interface whose pinned map to populate (-d/--dev).
pub fn dev_arg() -> Arg {
    Arg::new("dev")
        .short('d')
        .long("dev")
        .value_name("IFNAME")
        .help("Operate on the map pinned for device <IFNAME>")
}

/// Explicit pinned map path (--map).
pub fn map_arg() -> Arg {
    Arg::new("map")
        .long("map")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Operate on the map pinned at PATH")
}

/// Table image output (-o/--out).
pub fn out_arg() -> Arg {
    Arg::new("out")
        .short('o')
        .long("out")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write a table image file instead of a map")
}

/// Compile into memory only (--dry-run).
pub fn dry_run_arg() -> Arg {
    Arg::new("dry_run")
        .long("dry-run")
        .action(ArgAction::SetTrue)
        .help("Compile into an in-memory map and report the result")
}

/// Fail on partial writes (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Exit with an error if any map update fails")
}

/// Table image input (--image).
pub fn image_arg() -> Arg {
    Arg::new("image")
        .long("image")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with_all(["pattern", "dfa"])
        .help("Read the table from an image file")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Configuration file (-c/--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .env(CONFIG_ENV)
        .value_parser(value_parser!(PathBuf))
        .help("Configuration file")
}

/// More logging (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Increase log verbosity (-v debug, -vv trace)")
}

/// Errors only (-q/--quiet).
pub fn quiet_arg() -> Arg {
    Arg::new("quiet")
        .short('q')
        .long("quiet")
        .action(ArgAction::SetTrue)
        .conflicts_with("verbose")
        .help("Only log errors")
}
