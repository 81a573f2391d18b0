//! Low-level generative-model client
//!
//! Provides the [`LlmClient`] trait and the Gemini implementation. Higher
//! level prompt construction lives in [`crate::gateway`].

mod client;
mod error;
mod gemini;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{FinishReason, GenerateRequest, GenerateResponse, TokenUsage};

#[cfg(test)]
pub use client::mock::MockLlmClient;
