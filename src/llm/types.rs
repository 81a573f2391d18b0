//! LLM request/response types
//!
//! These model the Gemini generateContent API but stay provider-agnostic
//! enough for other schema-constrained JSON providers.

use serde::{Deserialize, Serialize};

/// A generation request - everything needed for one model call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Rendered prompt text (from a Handlebars template)
    pub prompt: String,

    /// JSON schema the response must conform to (None = free text)
    pub response_schema: Option<serde_json::Value>,

    /// Max tokens for the response
    pub max_output_tokens: u32,
}

impl GenerateRequest {
    /// A request whose response is constrained to the given JSON schema
    pub fn structured(prompt: impl Into<String>, schema: serde_json::Value, max_output_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
            max_output_tokens,
        }
    }
}

/// Response from a generation request
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Raw response text (JSON when a schema was supplied)
    pub text: String,

    /// Why the model stopped
    pub finish_reason: FinishReason,

    /// Token usage for cost tracking
    pub usage: TokenUsage,
}

impl GenerateResponse {
    /// Parse the response text as schema-constrained JSON
    pub fn parse_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.text)
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Other,
}

impl FinishReason {
    /// Parse from the API's finishReason string
    pub fn from_api(s: &str) -> Self {
        match s {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            _ => FinishReason::Other,
        }
    }
}

/// Token usage for cost tracking
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_request() {
        let req = GenerateRequest::structured("prompt", serde_json::json!({"type": "OBJECT"}), 512);
        assert!(req.response_schema.is_some());
        assert_eq!(req.max_output_tokens, 512);
    }

    #[test]
    fn test_finish_reason_from_api() {
        assert_eq!(FinishReason::from_api("STOP"), FinishReason::Stop);
        assert_eq!(FinishReason::from_api("MAX_TOKENS"), FinishReason::MaxTokens);
        assert_eq!(FinishReason::from_api("SAFETY"), FinishReason::Safety);
        assert_eq!(FinishReason::from_api("RECITATION"), FinishReason::Other);
    }

    #[test]
    fn test_parse_json() {
        let response = GenerateResponse {
            text: r#"{"problem": "p", "solution": "s"}"#.to_string(),
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
        };
        let value: serde_json::Value = response.parse_json().unwrap();
        assert_eq!(value["problem"], "p");
    }
}
