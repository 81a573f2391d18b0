//! StudySphere - AI study partner matching
//!
//! CLI entry point for the interactive session and one-off commands.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use studysphere::cli::{Cli, Command, OutputFormat, get_log_path};
use studysphere::config::Config;
use studysphere::directory;
use studysphere::gateway::{GeminiGateway, StudyGateway};
use studysphere::llm::{GeminiClient, LlmClient};
use studysphere::prompts::PromptLoader;
use studysphere::repl;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studysphere")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("studysphere.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "StudySphere loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        None | Some(Command::Run) => repl::run_interactive(&config).await,
        Some(Command::Roster { format }) => cmd_roster(format),
        Some(Command::Plan { subject, format }) => cmd_plan(&config, &subject, format).await,
        Some(Command::Logs { lines }) => cmd_logs(lines),
    }
}

/// Print the candidate roster and study groups
fn cmd_roster(format: OutputFormat) -> Result<()> {
    let profiles = directory::mock_profiles();
    let groups = directory::mock_groups();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "students": profiles,
                "groups": groups,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!("Students");
            println!("--------");
            for p in &profiles {
                println!(
                    "  {} - helps with: {} - needs: {}",
                    p.name,
                    p.subjects_can_help.join(", "),
                    p.subjects_help_needed.join(", ")
                );
            }
            println!();
            println!("Groups");
            println!("------");
            for g in &groups {
                println!(
                    "  {} ({}) - {}/{} members",
                    g.name,
                    g.topic,
                    g.members.len(),
                    g.capacity
                );
            }
        }
    }

    Ok(())
}

/// Generate a one-off study plan without the interactive session
async fn cmd_plan(config: &Config, subject: &str, format: OutputFormat) -> Result<()> {
    config.validate()?;

    let llm: Arc<dyn LlmClient> =
        Arc::new(GeminiClient::from_config(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?);
    let gateway = GeminiGateway::new(llm, PromptLoader::new(std::env::current_dir()?));

    let plan = gateway
        .generate_study_plan(subject)
        .await
        .map_err(|e| eyre::eyre!("Failed to generate study plan: {}", e))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        OutputFormat::Text => {
            println!("Study plan: {}", subject);
            println!();
            println!("Key topics:");
            for topic in &plan.key_topics {
                println!("  - {}", topic);
            }
            println!();
            println!("Discussion questions:");
            for q in &plan.discussion_questions {
                println!("  - {}", q);
            }
            println!();
            println!("Practice problem:");
            println!("  {}", plan.practice_problem.problem);
            println!("Solution:");
            println!("  {}", plan.practice_problem.solution);
        }
    }

    Ok(())
}

/// Show the last N lines of the application log
fn cmd_logs(lines: usize) -> Result<()> {
    let log_path = get_log_path();

    if !log_path.exists() {
        println!("No log file found at: {}", log_path.display());
        return Ok(());
    }

    let file = fs::File::open(&log_path).context("Failed to open log file")?;
    let reader = BufReader::new(file);
    let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

    let start = all_lines.len().saturating_sub(lines);
    for line in &all_lines[start..] {
        println!("{}", line);
    }

    Ok(())
}
