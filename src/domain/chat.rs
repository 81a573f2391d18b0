//! Chat transcript types for the simulated collaboration chat

use chrono::Local;
use serde::{Deserialize, Serialize};

/// One transcript entry, scoped to a single collaboration session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Participant name, or the user's display name
    pub sender: String,
    pub text: String,
    /// Display timestamp (HH:MM); transcripts are never persisted
    pub timestamp: String,
}

impl ChatMessage {
    pub fn now(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }
}

/// The model's next simulated message, before transcript append
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub sender: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_carries_display_timestamp() {
        let msg = ChatMessage::now("Alex", "hello");
        assert_eq!(msg.sender, "Alex");
        assert_eq!(msg.text, "hello");
        // HH:MM
        assert_eq!(msg.timestamp.len(), 5);
        assert_eq!(msg.timestamp.as_bytes()[2], b':');
    }

    #[test]
    fn test_reply_deserializes_gateway_shape() {
        let json = r#"{"sender": "Dana", "text": "Let's start with limits."}"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.sender, "Dana");
    }
}
