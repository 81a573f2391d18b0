//! Prompt templates for the AI gateway
//!
//! Handlebars templates with embedded defaults and optional file overrides.

mod embedded;
mod loader;

pub use loader::{ChatPromptContext, MatchPromptContext, PreviewPromptContext, PromptLoader, SubjectPromptContext};
