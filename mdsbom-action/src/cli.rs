//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O. Run configuration itself comes
//! from the action inputs, not from flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// mdsbom-action -- provision the Mayhem dynamic SBOM daemon and scan.
///
/// Without a subcommand the full action runs, reading its inputs from
/// `INPUT_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "mdsbom-action", version, about, long_about = None)]
pub struct Cli {
    /// Log level filter (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Log line format.
    #[arg(long, global = true, default_value = "compact")]
    pub log_format: LogFormat,

    /// Report format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Supported log line formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable output.
    Compact,
    /// Multi-line human-readable output.
    Pretty,
    /// JSON lines.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the daemon, provision the host and run the scan (default).
    Run(RunArgs),

    /// Print the provisioning script without downloading or executing anything.
    Render(RenderArgs),

    /// Print the resolved run configuration.
    Inputs,
}

// ---- run ----

/// Run the full action.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Reject an empty token or workspace before downloading anything.
    #[arg(long)]
    pub strict: bool,
}

// ---- render ----

/// Render the provisioning script.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Package path to substitute for the downloaded artifact.
    #[arg(long, default_value = "mdsbom.deb")]
    pub artifact: PathBuf,

    /// Include the API token instead of a placeholder.
    #[arg(long)]
    pub show_secrets: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_no_subcommand_defaults() {
        let cli = Cli::try_parse_from(["mdsbom-action"]).expect("parse succeeded");
        assert!(cli.command.is_none(), "no subcommand should run the action");
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_format, LogFormat::Compact);
        assert!(matches!(cli.output, OutputFormat::Text));
    }

    #[test]
    fn test_cli_parse_run_strict() {
        let cli = Cli::try_parse_from(["mdsbom-action", "run", "--strict"]).expect("parse succeeded");
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.strict, "strict should be true"),
            other => panic!("expected Run command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_run_defaults_to_lenient() {
        let cli = Cli::try_parse_from(["mdsbom-action", "run"]).expect("parse succeeded");
        match cli.command {
            Some(Commands::Run(args)) => assert!(!args.strict),
            other => panic!("expected Run command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_render_defaults() {
        let cli = Cli::try_parse_from(["mdsbom-action", "render"]).expect("parse succeeded");
        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.artifact, PathBuf::from("mdsbom.deb"));
                assert!(!args.show_secrets);
            }
            other => panic!("expected Render command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_render_custom_artifact() {
        let cli = Cli::try_parse_from([
            "mdsbom-action",
            "render",
            "--artifact",
            "/tmp/pkg.deb",
            "--show-secrets",
        ])
        .expect("parse succeeded");
        match cli.command {
            Some(Commands::Render(args)) => {
                assert_eq!(args.artifact, PathBuf::from("/tmp/pkg.deb"));
                assert!(args.show_secrets);
            }
            other => panic!("expected Render command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mdsbom-action",
            "inputs",
            "--output",
            "json",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("parse succeeded");
        assert!(matches!(cli.command, Some(Commands::Inputs)));
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_cli_rejects_unknown_log_format() {
        let result = Cli::try_parse_from(["mdsbom-action", "--log-format", "xml"]);
        assert!(result.is_err(), "unknown log format should be rejected");
    }
}
