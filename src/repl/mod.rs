//! Interactive REPL for StudySphere
//!
//! Drives the full flow from login through profile entry, AI matchmaking,
//! and the collaboration space, from a line-oriented prompt.

mod session;

pub use session::ReplSession;

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;

use crate::auth::AuthStore;
use crate::config::Config;
use crate::directory;
use crate::gateway::GeminiGateway;
use crate::llm::{GeminiClient, LlmClient};
use crate::prompts::PromptLoader;
use crate::session::SessionController;

/// Run the interactive REPL
///
/// This is the main entry point for `studysphere` with no subcommand.
pub async fn run_interactive(config: &Config) -> Result<()> {
    // Validate API key early
    if std::env::var(&config.llm.api_key_env).is_err() {
        return Err(eyre::eyre!(
            "LLM API key not found. Set the {} environment variable.",
            config.llm.api_key_env
        ));
    }

    // Create LLM client and gateway
    let llm: Arc<dyn LlmClient> = Arc::new(
        GeminiClient::from_config(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?,
    );
    let prompts = PromptLoader::new(std::env::current_dir()?);
    let gateway = Arc::new(GeminiGateway::new(llm, prompts));

    let controller = SessionController::new(gateway, directory::mock_profiles(), directory::mock_groups());

    let auth = if config.auth.store_path.is_empty() {
        AuthStore::at_default_location()
    } else {
        AuthStore::new(&config.auth.store_path)
    };

    let preview_interval = Duration::from_secs(config.matching.preview_interval_secs);

    let mut session = ReplSession::new(controller, auth, preview_interval);
    session.run().await
}
