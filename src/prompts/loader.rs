//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::domain::{ChatMessage, StudentProfile};

/// Context for rendering the find-matches prompt
#[derive(Debug, Clone, Serialize)]
pub struct MatchPromptContext {
    pub user: StudentProfile,
    pub needs_help: String,
    pub can_help: String,
    pub availability: String,
    pub study_method: String,
    pub roster_json: String,
    pub max_matches: usize,
}

impl MatchPromptContext {
    pub fn new(user: &StudentProfile, roster: &[StudentProfile], max_matches: usize) -> Result<Self> {
        Ok(Self {
            user: user.clone(),
            needs_help: user.subjects_help_needed.join(", "),
            can_help: user.subjects_can_help.join(", "),
            availability: user.availability.join(", "),
            study_method: user.study_method.clone(),
            roster_json: serde_json::to_string_pretty(roster)?,
            max_matches,
        })
    }
}

/// Context for subject-only prompts (study plan, practice problem)
#[derive(Debug, Clone, Serialize)]
pub struct SubjectPromptContext {
    pub subject: String,
}

/// Context for the chat-reply prompt
#[derive(Debug, Clone, Serialize)]
pub struct ChatPromptContext {
    pub subject: String,
    pub participants: String,
    pub user_name: String,
    pub transcript: String,
}

impl ChatPromptContext {
    pub fn new(history: &[ChatMessage], participants: &[String], subject: &str, user_name: &str) -> Self {
        let transcript = if history.is_empty() {
            "(no messages yet)".to_string()
        } else {
            history
                .iter()
                .map(|m| format!("{}: {}", m.sender, m.text))
                .collect::<Vec<_>>()
                .join("\n")
        };
        Self {
            subject: subject.to_string(),
            participants: participants.join(", "),
            user_name: user_name.to_string(),
            transcript,
        }
    }
}

/// Context for the group activity preview prompt
#[derive(Debug, Clone, Serialize)]
pub struct PreviewPromptContext {
    pub group_name: String,
    pub topic: String,
}

/// Templates render to plain-text LLM prompts, so HTML escaping must be off
/// (it would mangle quotes in embedded JSON like `roster_json`).
fn new_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    hbs: Handlebars<'static>,
    /// User override directory (e.g. `.studysphere/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g. `prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let user_dir = root.join(".studysphere/prompts");
        let repo_dir = root.join("prompts");

        Self {
            hbs: new_registry(),
            user_dir: if user_dir.exists() { Some(user_dir) } else { None },
            repo_dir: if repo_dir.exists() { Some(repo_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: new_registry(),
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.studysphere/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from user override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        if let Some(ref repo_dir) = self.repo_dir {
            let path = repo_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from repo: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read repo prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}
