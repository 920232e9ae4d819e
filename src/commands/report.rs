//! Report command implementation
//!
//! Queries every enabled vendor and prints the hottest temperature of each.

use crate::aggregator::{collect_report, Schedule};
use crate::arena::ScratchArena;
use crate::cli::args::Cli;
use crate::cli::output::print_output;
use crate::config::{Config, ConfigBuilder};
use crate::domain::TemperatureReport;
use crate::error::Result;
use crate::vendor::sources_from_config;

/// Execute the report command
///
/// Vendor failures only zero their own line; configuration and output
/// errors are returned.
pub fn run_report(cli: &Cli) -> Result<()> {
    let config = config_from_cli(cli)?;
    raise_log_level(&config);
    let report = gather(&config);
    print_output(&report, cli.format)?;
    Ok(())
}

/// Merge the config file with the command-line overrides
pub fn config_from_cli(cli: &Cli) -> Result<Config> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_parallel(cli.parallel.then_some(true))
        .without_nvidia(cli.no_nvidia)
        .without_amd(cli.no_amd)
        .with_nvidia_library(cli.nvidia_library.clone())
        .with_amd_library(cli.amd_library.clone())
        .build()?;
    Ok(config)
}

/// Apply `general.verbose` from the merged configuration
///
/// Only ever raises the level set up in `main`.
pub fn raise_log_level(config: &Config) {
    if config.general.verbose && log::max_level() < log::LevelFilter::Debug {
        log::set_max_level(log::LevelFilter::Debug);
    }
}

/// Run the enabled vendor pipelines against a fresh scratch arena
pub fn gather(config: &Config) -> TemperatureReport {
    let arena = ScratchArena::with_capacity(config.scratch.capacity_bytes);
    let schedule = if config.general.parallel {
        Schedule::Parallel
    } else {
        Schedule::Sequential
    };

    let mut sources = sources_from_config(config);
    let report = collect_report(&mut sources, &arena, schedule);

    log::debug!(
        "Scratch arena used {} of {} bytes",
        arena.used(),
        arena.capacity()
    );

    report
}
