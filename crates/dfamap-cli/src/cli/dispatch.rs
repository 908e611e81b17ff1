//! Turns clap matches into the typed argument structs the commands take.
//!
//! Each `*Params` is read with `from_matches()` and converted with `Into`.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::{CompileArgs, Target};
use crate::commands::dump::DumpArgs;
use crate::commands::source::SourceArgs;

/// Flags every command accepts.
pub struct GlobalParams {
    pub config: Option<PathBuf>,
    pub verbose: u8,
    pub quiet: bool,
}

impl GlobalParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            config: m.get_one::<PathBuf>("config").cloned(),
            verbose: m.get_count("verbose"),
            quiet: m.get_flag("quiet"),
        }
    }
}

pub struct SourceParams {
    pub pattern: Option<String>,
    pub dfa: Option<PathBuf>,
    pub unanchored: bool,
    pub max_states: Option<usize>,
}

impl SourceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: m.get_one::<String>("pattern").cloned(),
            dfa: m.get_one::<PathBuf>("dfa").cloned(),
            unanchored: m.get_flag("unanchored"),
            max_states: m.get_one::<usize>("max_states").copied(),
        }
    }
}

impl From<SourceParams> for SourceArgs {
    fn from(p: SourceParams) -> Self {
        Self {
            pattern: p.pattern,
            dfa: p.dfa,
            unanchored: p.unanchored,
            max_states: p.max_states,
        }
    }
}

pub struct CompileParams {
    pub source: SourceParams,
    pub dev: Option<String>,
    pub map: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub dry_run: bool,
    pub strict: bool,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(m),
            dev: m.get_one::<String>("dev").cloned(),
            map: m.get_one::<PathBuf>("map").cloned(),
            out: m.get_one::<PathBuf>("out").cloned(),
            dry_run: m.get_flag("dry_run"),
            strict: m.get_flag("strict"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        // the "target" group admits exactly one of these
        let target = match (p.dev, p.map, p.out, p.dry_run) {
            (Some(ifname), _, _, _) => Target::Dev(ifname),
            (None, Some(path), _, _) => Target::Map(path),
            (None, None, Some(path), _) => Target::Image(path),
            (None, None, None, true) => Target::DryRun,
            (None, None, None, false) => unreachable!("clap should have caught this"),
        };
        Self {
            source: p.source.into(),
            target,
            strict: p.strict,
        }
    }
}

pub struct CheckParams {
    pub source: SourceParams,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source: p.source.into(),
        }
    }
}

pub struct DumpParams {
    pub source: SourceParams,
    pub image: Option<PathBuf>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(m),
            image: m.get_one::<PathBuf>("image").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            source: p.source.into(),
            image: p.image,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
