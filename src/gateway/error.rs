//! Gateway error types and user-facing message mapping

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from AI gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Response did not match the {operation} schema: {source}")]
    Schema {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Prompt rendering failed: {0}")]
    Prompt(String),
}

impl GatewayError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GatewayError::Llm(e) if e.is_rate_limit())
    }

    /// Short human-readable message for inline display
    ///
    /// Rate-limit failures get a distinct "slow down" message; everything
    /// else maps to a generic retryable message per operation.
    pub fn user_message(&self, action: &str) -> String {
        if self.is_rate_limit() {
            "You're going a little fast - please wait a moment and try again.".to_string()
        } else {
            format!("Sorry, we couldn't {action} right now. Please try again later.")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_rate_limit_gets_slow_down_message() {
        let err = GatewayError::Llm(LlmError::RateLimited {
            retry_after: Duration::from_secs(30),
        });
        assert!(err.is_rate_limit());
        assert!(err.user_message("find matches").contains("wait a moment"));
    }

    #[test]
    fn test_other_errors_name_the_action() {
        let err = GatewayError::Llm(LlmError::InvalidResponse("x".to_string()));
        assert!(!err.is_rate_limit());
        let msg = err.user_message("generate a study plan");
        assert!(msg.contains("generate a study plan"));
        assert!(msg.contains("try again"));
    }

    #[test]
    fn test_schema_error_display() {
        let source = serde_json::from_str::<i32>("not json").unwrap_err();
        let err = GatewayError::Schema {
            operation: "find_matches",
            source,
        };
        assert!(err.to_string().contains("find_matches"));
    }
}
