//! LlmClient trait definition

use async_trait::async_trait;

use super::{GenerateRequest, GenerateResponse, LlmError};

/// Stateless generative-model client - each call is independent
///
/// The core abstraction for talking to a language model. No conversation
/// state is kept between calls; every operation sends its full context.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single generation request and wait for the full response
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}
