//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::{ArgGroup, Command};

use super::args::*;

/// Logging and configuration flags, accepted by every command.
fn with_common_args(cmd: Command) -> Command {
    cmd.arg(config_arg()).arg(verbose_arg()).arg(quiet_arg())
}

/// Automaton input flags.
fn with_source_args(cmd: Command) -> Command {
    cmd.arg(pattern_arg())
        .arg(dfa_arg())
        .arg(unanchored_arg())
        .arg(max_states_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dfamap")
        .about("Compile deterministic automata into XDP inspection maps")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Compile an automaton and write its transition table.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Compile an automaton and write its transition table")
        .override_usage(
            "\
  dfamap compile [PATTERN] --dev <IFNAME>
  dfamap compile [PATTERN] --map <PATH>
  dfamap compile --dfa <FILE> --out <FILE>
  dfamap compile [PATTERN] --dry-run",
        )
        .after_help(
            r#"EXAMPLES:
  dfamap compile --dev eth0                 # configured pattern into eth0's map
  dfamap compile 'GET|POST' --dev eth0      # explicit pattern
  dfamap compile --dfa ids.json --out t.bin # JSON automaton to an image file
  dfamap compile 'dog' --dry-run --strict   # compile without a map"#,
        )
        .arg(dev_arg())
        .arg(map_arg())
        .arg(out_arg())
        .arg(dry_run_arg())
        .group(
            ArgGroup::new("target")
                .args(["dev", "map", "out", "dry_run"])
                .required(true)
                .multiple(false),
        )
        .arg(strict_arg());

    with_common_args(with_source_args(cmd))
}

/// Build the table without writing it.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate an automaton and report its table size")
        .after_help(
            r#"EXAMPLES:
  dfamap check                    # configured pattern
  dfamap check '(dog)|(cat)'
  dfamap check --dfa ids.json"#,
        );

    with_common_args(with_source_args(cmd))
}

/// Print a transition table.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print the transition table of an automaton or image file")
        .after_help(
            r#"EXAMPLES:
  dfamap dump '(dog)|(cat)'
  dfamap dump --dfa ids.json --color never
  dfamap dump --image table.bin"#,
        )
        .arg(image_arg())
        .arg(color_arg());

    with_common_args(with_source_args(cmd))
}
