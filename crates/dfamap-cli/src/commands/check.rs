use super::source::{SourceArgs, compiler_for, load_automaton};
use crate::config::Config;
use crate::error::CliError;

pub struct CheckArgs {
    pub source: SourceArgs,
}

pub fn run(args: CheckArgs, config: &Config) -> Result<(), CliError> {
    let automaton = load_automaton(&args.source, &config.compile)?;
    let compiler = compiler_for(&args.source, &config.compile);
    let table = automaton.plan(&compiler)?;

    println!(
        "states={} entries={} accepting={}",
        table.state_count(),
        table.len(),
        table.accepting_targets()
    );
    Ok(())
}
