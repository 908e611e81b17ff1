//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use clap::error::ErrorKind;

use super::*;
use crate::cli::commands::{check_command, compile_command, dump_command};
use crate::commands::compile::{CompileArgs, Target};

#[test]
fn compile_to_device() {
    let m = compile_command()
        .try_get_matches_from(["compile", "--dev", "eth0"])
        .unwrap();
    let args: CompileArgs = CompileParams::from_matches(&m).into();

    assert_eq!(args.target, Target::Dev("eth0".to_string()));
    assert_eq!(args.source.pattern, None);
    assert!(!args.strict);
}

#[test]
fn compile_with_pattern_and_strict() {
    let m = compile_command()
        .try_get_matches_from(["compile", "GET|POST", "-d", "eth1", "--strict"])
        .unwrap();
    let args: CompileArgs = CompileParams::from_matches(&m).into();

    assert_eq!(args.source.pattern.as_deref(), Some("GET|POST"));
    assert_eq!(args.target, Target::Dev("eth1".to_string()));
    assert!(args.strict);
}

#[test]
fn compile_targets() {
    let m = compile_command()
        .try_get_matches_from(["compile", "--map", "/sys/fs/bpf/x/m"])
        .unwrap();
    let args: CompileArgs = CompileParams::from_matches(&m).into();
    assert_eq!(args.target, Target::Map(PathBuf::from("/sys/fs/bpf/x/m")));

    let m = compile_command()
        .try_get_matches_from(["compile", "--dfa", "ids.json", "-o", "table.bin"])
        .unwrap();
    let args: CompileArgs = CompileParams::from_matches(&m).into();
    assert_eq!(args.target, Target::Image(PathBuf::from("table.bin")));
    assert_eq!(args.source.dfa, Some(PathBuf::from("ids.json")));

    let m = compile_command()
        .try_get_matches_from(["compile", "--dry-run"])
        .unwrap();
    let args: CompileArgs = CompileParams::from_matches(&m).into();
    assert_eq!(args.target, Target::DryRun);
}

#[test]
fn dry_run_flag_is_read() {
    let m = compile_command()
        .try_get_matches_from(["compile", "dog", "--dry-run"])
        .unwrap();
    let params = CompileParams::from_matches(&m);
    assert!(params.dry_run);
    let args: CompileArgs = params.into();
    assert_eq!(args.target, Target::DryRun);

    let m = compile_command()
        .try_get_matches_from(["compile", "dog", "-o", "t.bin"])
        .unwrap();
    let params = CompileParams::from_matches(&m);
    assert!(!params.dry_run);
    let args: CompileArgs = params.into();
    assert_eq!(args.target, Target::Image(PathBuf::from("t.bin")));
}

#[test]
fn compile_requires_a_target() {
    let err = compile_command()
        .try_get_matches_from(["compile", "dog"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn compile_rejects_two_targets() {
    let err = compile_command()
        .try_get_matches_from(["compile", "--dev", "eth0", "--dry-run"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn pattern_conflicts_with_dfa_file() {
    let err = check_command()
        .try_get_matches_from(["check", "dog", "--dfa", "ids.json"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn source_options() {
    let m = check_command()
        .try_get_matches_from(["check", "abc", "--unanchored", "--max-states", "12"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.source.pattern.as_deref(), Some("abc"));
    assert!(params.source.unanchored);
    assert_eq!(params.source.max_states, Some(12));
}

#[test]
fn max_states_must_be_a_number() {
    let err = check_command()
        .try_get_matches_from(["check", "--max-states", "lots"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn dump_from_image() {
    let m = dump_command()
        .try_get_matches_from(["dump", "--image", "table.bin", "--color", "never"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.image, Some(PathBuf::from("table.bin")));
    assert_eq!(params.color, ColorChoice::Never);
    assert!(!params.color.should_colorize());
}

#[test]
fn dump_image_conflicts_with_pattern() {
    let err = dump_command()
        .try_get_matches_from(["dump", "dog", "--image", "table.bin"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn dump_color_defaults_to_auto() {
    let m = dump_command().try_get_matches_from(["dump"]).unwrap();
    assert_eq!(DumpParams::from_matches(&m).color, ColorChoice::Auto);

    let m = dump_command()
        .try_get_matches_from(["dump", "--color", "always"])
        .unwrap();
    assert!(DumpParams::from_matches(&m).color.should_colorize());
}

#[test]
fn global_flags() {
    let m = check_command()
        .try_get_matches_from(["check", "-vv", "--config", "dfamap.toml"])
        .unwrap();
    let global = GlobalParams::from_matches(&m);

    assert_eq!(global.verbose, 2);
    assert!(!global.quiet);
    assert_eq!(global.config, Some(PathBuf::from("dfamap.toml")));

    let m = dump_command().try_get_matches_from(["dump", "-q"]).unwrap();
    assert!(GlobalParams::from_matches(&m).quiet);
}

#[test]
fn quiet_conflicts_with_verbose() {
    let err = compile_command()
        .try_get_matches_from(["compile", "--dry-run", "-q", "-v"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["dfamap"]);
    assert!(result.is_err());

    let m = build_cli()
        .try_get_matches_from(["dfamap", "check", "dog"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("check"));
}

#[test]
fn cli_is_well_formed() {
    build_cli().debug_assert();
}
