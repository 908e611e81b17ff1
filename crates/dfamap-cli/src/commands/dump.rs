use std::path::PathBuf;

use dfamap_table::{Colors, TableEntry, TableImage, dump};

use super::source::{SourceArgs, compiler_for, load_automaton};
use crate::config::Config;
use crate::error::CliError;

pub struct DumpArgs {
    pub source: SourceArgs,
    pub image: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: DumpArgs, config: &Config) -> Result<(), CliError> {
    let entries = load_entries(&args, config)?;
    print!("{}", dump(&entries, Colors::new(args.color)));
    Ok(())
}

pub fn load_entries(args: &DumpArgs, config: &Config) -> Result<Vec<TableEntry>, CliError> {
    if let Some(path) = &args.image {
        let image = TableImage::from_path(path).map_err(|source| CliError::Image {
            path: path.clone(),
            source,
        })?;
        return Ok(image.into_entries());
    }

    let automaton = load_automaton(&args.source, &config.compile)?;
    let compiler = compiler_for(&args.source, &config.compile);
    Ok(automaton.plan(&compiler)?.into_entries())
}
