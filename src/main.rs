//! gputemp - hottest GPU temperature per vendor
//!
//! A command-line tool that reports the hottest sensor reading of NVIDIA
//! GPUs (via NvAPI) and AMD GPUs (via ADL).

use clap::Parser;
use gputemp::cli::args::{generate_completions, Cli, Commands};
use gputemp::commands::run_report;
use gputemp::error::{AppError, ConfigError};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        None | Some(Commands::Report) => run_report(cli),

        Some(Commands::Completions { shell }) => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    if let AppError::Config(ConfigError::FileNotFound(_)) = err {
        eprintln!();
        eprintln!("Hint: Check the --config path or the GPUTEMP_CONFIG variable.");
    }
}
