use std::path::PathBuf;

use dfamap_compiler::{MapStore, MemoryStore, WriteSummary};

use super::source::{SourceArgs, compiler_for, load_automaton};
use crate::config::Config;
use crate::error::CliError;
use crate::store::{ImageStore, PinnedMap};

/// Where the table goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Map pinned for an interface under the configured pin directory.
    Dev(String),
    /// Map pinned at an explicit path.
    Map(PathBuf),
    /// Table image file.
    Image(PathBuf),
    /// In-memory map, discarded afterwards.
    DryRun,
}

pub struct CompileArgs {
    pub source: SourceArgs,
    pub target: Target,
    pub strict: bool,
}

pub fn run(args: CompileArgs, config: &Config) -> Result<(), CliError> {
    let summary = match &args.target {
        Target::Dev(ifname) => {
            let path = config.map.pin_path(ifname);
            tracing::info!(path = %path.display(), "map dir");
            write_pinned(&args, config, path)?
        }
        Target::Map(path) => write_pinned(&args, config, path.clone())?,
        Target::Image(path) => {
            let mut store = ImageStore::new();
            let summary = compile_into(&args, config, &mut store)?;
            let image = store.to_image().map_err(|source| CliError::Image {
                path: path.clone(),
                source,
            })?;
            image.write_to_path(path).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), entries = store.len(), "wrote table image");
            summary
        }
        Target::DryRun => compile_into(&args, config, &mut MemoryStore::new())?,
    };

    println!("{}", summary);
    check_summary(&summary, args.strict)
}

/// Open the pinned map before compiling, so a missing map fails fast.
fn write_pinned(
    args: &CompileArgs,
    config: &Config,
    path: PathBuf,
) -> Result<WriteSummary, CliError> {
    let mut map = match PinnedMap::open(&path) {
        Ok(map) => map,
        Err(source) => return Err(CliError::OpenMap { path, source }),
    };
    tracing::info!(
        path = %map.path().display(),
        max_entries = map.max_entries(),
        "opened map"
    );
    compile_into(args, config, &mut map)
}

fn compile_into<S: MapStore + ?Sized>(
    args: &CompileArgs,
    config: &Config,
    store: &mut S,
) -> Result<WriteSummary, CliError> {
    let automaton = load_automaton(&args.source, &config.compile)?;
    let compiler = compiler_for(&args.source, &config.compile);
    Ok(automaton.compile(&compiler, store)?)
}

/// Under `strict`, any failed write fails the command.
pub fn check_summary(summary: &WriteSummary, strict: bool) -> Result<(), CliError> {
    if strict && !summary.is_complete() {
        return Err(CliError::Incomplete {
            attempted: summary.attempted(),
            failed: summary.failed(),
        });
    }
    Ok(())
}
