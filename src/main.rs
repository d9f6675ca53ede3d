use clap::Parser;
use extcheck::cli::{Cli, run_cli};
use extcheck::logging;
use extcheck::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match run_cli(&cli) {
        Ok(outcome) if outcome.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            OutputFormatter::error(&format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}
