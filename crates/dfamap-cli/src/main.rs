mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod store;


use cli::{CheckParams, CompileParams, DumpParams, GlobalParams, build_cli};
use config::Config;
use error::{CliError, EXIT_FAIL_OPTION, EXIT_OK};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };

    let global = GlobalParams::from_matches(m);
    let config = match Config::load(global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(EXIT_FAIL_OPTION);
        }
    };
    logging::init_logging(&logging::effective_level(
        global.verbose,
        global.quiet,
        &config.logging.level,
    ));
    config::log_source(global.config.as_deref());
    tracing::debug!(?config, "resolved configuration");

    let result: Result<(), CliError> = match name {
        "compile" => commands::compile::run(CompileParams::from_matches(m).into(), &config),
        "check" => commands::check::run(CheckParams::from_matches(m).into(), &config),
        "dump" => commands::dump::run(DumpParams::from_matches(m).into(), &config),
        _ => unreachable!("clap should have caught this"),
    };

    let code = match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}
