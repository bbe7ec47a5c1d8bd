//! versegrid CLI - a verse corpus rendered as a grayscale byte grid

mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    let options = cli.options();
    log::debug!("Options: {:?}", options);

    let result = versegrid::try_visualize(&cli.input, &cli.output, &options);
    match versegrid::report(result, &cli.output, cli.quiet) {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    }
}
