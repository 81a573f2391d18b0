//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// StudySphere - AI study partner matching
#[derive(Parser)]
#[command(
    name = "studysphere",
    about = "Find study partners and collaborate with AI-generated study plans",
    version,
    after_help = "Logs are written to: ~/.local/share/studysphere/logs/studysphere.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run the interactive session (default)
    Run,

    /// Print the candidate roster and study groups
    Roster {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate a one-off study plan for a subject
    Plan {
        /// Subject to build a plan for
        subject: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show application logs
    Logs {
        /// Number of lines to show
        #[arg(short, long, default_value = "50")]
        lines: usize,
    },
}

/// Output format for roster/plan commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Path of the application log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studysphere")
        .join("logs")
        .join("studysphere.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["studysphere"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["studysphere", "run"]);
        assert!(matches!(cli.command, Some(Command::Run)));
    }

    #[test]
    fn test_cli_parse_roster() {
        let cli = Cli::parse_from(["studysphere", "roster"]);
        assert!(matches!(
            cli.command,
            Some(Command::Roster {
                format: OutputFormat::Text
            })
        ));
    }

    #[test]
    fn test_cli_parse_roster_json() {
        let cli = Cli::parse_from(["studysphere", "roster", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Some(Command::Roster {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_cli_parse_plan() {
        let cli = Cli::parse_from(["studysphere", "plan", "Calculus"]);
        if let Some(Command::Plan { subject, .. }) = cli.command {
            assert_eq!(subject, "Calculus");
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["studysphere", "-c", "/path/to/config.yml", "roster"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
