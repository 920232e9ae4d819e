//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// GPU temperature reporter
///
/// Reports the hottest sensor temperature per GPU vendor (NVIDIA via NvAPI,
/// AMD via ADL).
#[derive(Parser, Debug)]
#[command(name = "gputemp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GPUTEMP_CONFIG")]
    pub config: Option<String>,

    /// Query the vendors on separate threads
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Skip the NVIDIA backend
    #[arg(long, global = true)]
    pub no_nvidia: bool,

    /// Skip the AMD backend
    #[arg(long, global = true)]
    pub no_amd: bool,

    /// NvAPI module name or path
    #[arg(long, global = true, value_name = "LIBRARY")]
    pub nvidia_library: Option<String>,

    /// ADL module name or path
    #[arg(long, global = true, value_name = "LIBRARY")]
    pub amd_library: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report the hottest temperature per vendor (default)
    Report,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable two-line report
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_subcommand() {
        let args = Cli::try_parse_from(["gputemp"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn test_cli_parse_report() {
        let args = Cli::try_parse_from(["gputemp", "report"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Report)));
    }

    #[test]
    fn test_cli_parse_verbose_and_format() {
        let args = Cli::try_parse_from(["gputemp", "-v", "--format", "json"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_parse_backend_flags() {
        let args = Cli::try_parse_from([
            "gputemp",
            "report",
            "--no-nvidia",
            "--parallel",
            "--amd-library",
            "/opt/amd/libatiadlxx.so",
        ])
        .unwrap();

        assert!(args.no_nvidia);
        assert!(!args.no_amd);
        assert!(args.parallel);
        assert_eq!(args.amd_library.as_deref(), Some("/opt/amd/libatiadlxx.so"));
    }

    #[test]
    fn test_cli_parse_completions() {
        let args = Cli::try_parse_from(["gputemp", "completions", "bash"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Completions { shell: Shell::Bash })
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["gputemp", "--format", "xml"]);
        assert!(result.is_err());
    }
}
