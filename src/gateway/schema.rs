//! Response schemas for schema-constrained JSON generation
//!
//! Field names and types here are load-bearing: they are the wire contract
//! between the prompts and the serde types in [`crate::domain`].

use serde_json::{Value, json};

/// Schema for find_matches: `{ matches: [{ id, matchReason }] }`
pub fn matches_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "matches": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "INTEGER" },
                        "matchReason": { "type": "STRING" }
                    },
                    "required": ["id", "matchReason"]
                }
            }
        },
        "required": ["matches"]
    })
}

/// Schema for generate_study_plan
pub fn study_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "keyTopics": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 3-5 core concepts or topics to review."
            },
            "discussionQuestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 2-3 thought-provoking questions to discuss."
            },
            "practiceProblem": {
                "type": "OBJECT",
                "properties": {
                    "problem": { "type": "STRING" },
                    "solution": { "type": "STRING" }
                },
                "required": ["problem", "solution"],
                "description": "A relevant practice problem and its detailed solution."
            }
        },
        "required": ["keyTopics", "discussionQuestions", "practiceProblem"]
    })
}

/// Schema for generate_practice_problem
pub fn practice_problem_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "problem": { "type": "STRING" },
            "solution": { "type": "STRING" }
        },
        "required": ["problem", "solution"]
    })
}

/// Schema for generate_chat_response: `{ sender, text }`
pub fn chat_reply_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sender": { "type": "STRING" },
            "text": { "type": "STRING" }
        },
        "required": ["sender", "text"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_are_declared() {
        let schema = matches_schema();
        let required = &schema["properties"]["matches"]["items"]["required"];
        assert_eq!(required, &json!(["id", "matchReason"]));

        let schema = chat_reply_schema();
        assert_eq!(schema["required"], json!(["sender", "text"]));
    }

    #[test]
    fn test_plan_schema_matches_domain_field_names() {
        let schema = study_plan_schema();
        for key in ["keyTopics", "discussionQuestions", "practiceProblem"] {
            assert!(schema["properties"].get(key).is_some(), "missing {key}");
        }
    }
}
