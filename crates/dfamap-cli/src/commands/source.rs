//! Automaton loading shared by all commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use dfamap_compiler::{
    CompileError, Dfa, MapStore, RegexAutomaton, TableCompiler, TransitionTable, WriteSummary,
};

use crate::config::CompileConfig;
use crate::error::CliError;

pub struct SourceArgs {
    pub pattern: Option<String>,
    pub dfa: Option<PathBuf>,
    pub unanchored: bool,
    pub max_states: Option<usize>,
}

/// An automaton from one of the supported sources.
#[derive(Debug)]
pub enum LoadedAutomaton {
    Pattern(RegexAutomaton),
    Graph(Dfa),
}

impl LoadedAutomaton {
    pub fn plan(&self, compiler: &TableCompiler) -> Result<TransitionTable, CompileError> {
        match self {
            Self::Pattern(re) => compiler.plan(re),
            Self::Graph(dfa) => compiler.plan(dfa),
        }
    }

    pub fn compile<S: MapStore + ?Sized>(
        &self,
        compiler: &TableCompiler,
        store: &mut S,
    ) -> Result<WriteSummary, CompileError> {
        match self {
            Self::Pattern(re) => compiler.compile(re, store),
            Self::Graph(dfa) => compiler.compile(dfa, store),
        }
    }
}

/// Load the automaton named by `args`, falling back to the configured pattern.
pub fn load_automaton(
    args: &SourceArgs,
    config: &CompileConfig,
) -> Result<LoadedAutomaton, CliError> {
    if let Some(path) = &args.dfa {
        let text = read_description(path)?;
        let dfa = Dfa::from_json(&text)?;
        tracing::info!(path = %path.display(), states = dfa.len(), "loaded automaton description");
        return Ok(LoadedAutomaton::Graph(dfa));
    }

    let pattern = args.pattern.as_deref().unwrap_or(&config.pattern);
    let mut options = config.regex_options();
    if args.unanchored {
        options.anchored = false;
    }
    let re = RegexAutomaton::with_options(pattern, options)?;
    tracing::info!(pattern, "compiled pattern");
    Ok(LoadedAutomaton::Pattern(re))
}

/// Compiler honoring `--max-states` over the configured limit.
pub fn compiler_for(args: &SourceArgs, config: &CompileConfig) -> TableCompiler {
    let mut options = config.compile_options();
    if let Some(max_states) = args.max_states {
        options.max_states = max_states;
    }
    TableCompiler::new(options)
}

fn read_description(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(read_err)
}
