//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when template files are not
//! found. All templates are Handlebars; the rendered output is paired with
//! a response schema in the gateway where one applies.

/// Prompt for selecting compatible study partners from the roster
pub const FIND_MATCHES: &str = r#"Based on the user's profile below, find the top {{max_matches}} most compatible study partners from the provided list of available students.

User Profile:
- Name: {{user.name}}
- Needs help in: {{needs_help}}
- Can help in: {{can_help}}
- Availability: {{availability}}
- Preferred Study Method: {{study_method}}

Available Students:
{{roster_json}}

Prioritize matches where the user's "needs help" subjects align with a student's "can help" subjects. Also, consider overlapping availability and compatible study methods. For each match, provide a concise, friendly reason explaining why they are a good fit.
"#;

/// Prompt for generating a collaborative study plan
pub const STUDY_PLAN: &str = r#"Generate a brief, actionable study plan for a collaborative session on the topic: "{{subject}}". The plan should be suitable for two students studying together. Provide key topics for discussion, engaging questions to kickstart the conversation, and a practice problem with a solution.
"#;

/// Prompt for generating a replacement practice problem
pub const PRACTICE_PROBLEM: &str = r#"Generate a single, new practice problem with a solution for the topic: "{{subject}}". The problem should be different from a typical textbook example and suitable for collaborative solving.
"#;

/// Prompt for the next simulated chat message
pub const CHAT_REPLY: &str = r#"You are role-playing the study partners in a live study session on "{{subject}}".
The participants are: {{participants}}. The user is named {{user_name}}.

Conversation so far:
{{transcript}}

Write the single next message in the conversation. It must come from exactly one of the participants listed above - never from {{user_name}}. Keep it short, friendly, and focused on studying {{subject}}.
"#;

/// One-line activity preview for a group card
pub const GROUP_PREVIEW: &str = r#"Write one short line of realistic study-group chat activity for a group called "{{group_name}}" studying {{topic}}. Output only the line, no attribution.
"#;

/// Look up an embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "find-matches" => Some(FIND_MATCHES),
        "study-plan" => Some(STUDY_PLAN),
        "practice-problem" => Some(PRACTICE_PROBLEM),
        "chat-reply" => Some(CHAT_REPLY),
        "group-preview" => Some(GROUP_PREVIEW),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_present() {
        for name in [
            "find-matches",
            "study-plan",
            "practice-problem",
            "chat-reply",
            "group-preview",
        ] {
            assert!(get_embedded(name).is_some(), "missing embedded template: {name}");
        }
        assert!(get_embedded("nonexistent").is_none());
    }

    #[test]
    fn test_templates_reference_expected_variables() {
        assert!(FIND_MATCHES.contains("{{roster_json}}"));
        assert!(STUDY_PLAN.contains("{{subject}}"));
        assert!(CHAT_REPLY.contains("{{participants}}"));
    }
}
