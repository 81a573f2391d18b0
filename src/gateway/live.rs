//! Live StudyGateway implementation on top of an LlmClient

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{GatewayError, MAX_MATCHES, StudyGateway, schema};
use crate::domain::{ChatMessage, ChatReply, MatchCandidate, PracticeProblem, StudentProfile, StudyPlan};
use crate::llm::{GenerateRequest, LlmClient};
use crate::prompts::{ChatPromptContext, MatchPromptContext, PreviewPromptContext, PromptLoader, SubjectPromptContext};

/// Token budgets per operation
const MATCH_MAX_TOKENS: u32 = 2048;
const PLAN_MAX_TOKENS: u32 = 4096;
const PROBLEM_MAX_TOKENS: u32 = 2048;
const CHAT_MAX_TOKENS: u32 = 512;
const PREVIEW_MAX_TOKENS: u32 = 128;

/// Wire shape of the find_matches response
#[derive(Debug, Deserialize)]
struct MatchesEnvelope {
    matches: Vec<MatchCandidate>,
}

/// StudyGateway backed by a generative model
///
/// Named for the provider the default configuration targets; any
/// [`LlmClient`] works.
pub struct GeminiGateway {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
}

impl GeminiGateway {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader) -> Self {
        Self { llm, prompts }
    }

    fn render<C: serde::Serialize>(&self, template: &str, ctx: &C) -> Result<String, GatewayError> {
        self.prompts
            .render(template, ctx)
            .map_err(|e| GatewayError::Prompt(e.to_string()))
    }
}

#[async_trait]
impl StudyGateway for GeminiGateway {
    async fn find_matches(
        &self,
        profile: &StudentProfile,
        roster: &[StudentProfile],
    ) -> Result<Vec<MatchCandidate>, GatewayError> {
        debug!(user = %profile.name, roster_size = roster.len(), "find_matches: called");
        let ctx = MatchPromptContext::new(profile, roster, MAX_MATCHES)
            .map_err(|e| GatewayError::Prompt(e.to_string()))?;
        let prompt = self.render("find-matches", &ctx)?;

        let response = self
            .llm
            .generate(GenerateRequest::structured(prompt, schema::matches_schema(), MATCH_MAX_TOKENS))
            .await?;

        let envelope: MatchesEnvelope = response.parse_json().map_err(|source| GatewayError::Schema {
            operation: "find_matches",
            source,
        })?;

        let mut candidates = envelope.matches;
        if candidates.len() > MAX_MATCHES {
            debug!(returned = candidates.len(), "find_matches: truncating to {MAX_MATCHES}");
            candidates.truncate(MAX_MATCHES);
        }
        debug!(count = candidates.len(), "find_matches: parsed candidates");
        Ok(candidates)
    }

    async fn generate_study_plan(&self, subject: &str) -> Result<StudyPlan, GatewayError> {
        debug!(%subject, "generate_study_plan: called");
        let ctx = SubjectPromptContext {
            subject: subject.to_string(),
        };
        let prompt = self.render("study-plan", &ctx)?;

        let response = self
            .llm
            .generate(GenerateRequest::structured(prompt, schema::study_plan_schema(), PLAN_MAX_TOKENS))
            .await?;

        response.parse_json().map_err(|source| GatewayError::Schema {
            operation: "generate_study_plan",
            source,
        })
    }

    async fn generate_practice_problem(&self, subject: &str) -> Result<PracticeProblem, GatewayError> {
        debug!(%subject, "generate_practice_problem: called");
        let ctx = SubjectPromptContext {
            subject: subject.to_string(),
        };
        let prompt = self.render("practice-problem", &ctx)?;

        let response = self
            .llm
            .generate(GenerateRequest::structured(
                prompt,
                schema::practice_problem_schema(),
                PROBLEM_MAX_TOKENS,
            ))
            .await?;

        response.parse_json().map_err(|source| GatewayError::Schema {
            operation: "generate_practice_problem",
            source,
        })
    }

    async fn generate_chat_response(
        &self,
        history: &[ChatMessage],
        participants: &[String],
        subject: &str,
        user_name: &str,
    ) -> Result<ChatReply, GatewayError> {
        debug!(%subject, history_len = history.len(), "generate_chat_response: called");
        let ctx = ChatPromptContext::new(history, participants, subject, user_name);
        let prompt = self.render("chat-reply", &ctx)?;

        let response = self
            .llm
            .generate(GenerateRequest::structured(prompt, schema::chat_reply_schema(), CHAT_MAX_TOKENS))
            .await?;

        let mut reply: ChatReply = response.parse_json().map_err(|source| GatewayError::Schema {
            operation: "generate_chat_response",
            source,
        })?;

        // The model may not attribute the reply to the user or invent a
        // sender; re-attribute to the first participant if it does.
        let valid_sender = reply.sender != user_name && participants.iter().any(|p| p == &reply.sender);
        if !valid_sender && let Some(first) = participants.first() {
            warn!(sender = %reply.sender, "generate_chat_response: re-attributing invalid sender");
            reply.sender = first.clone();
        }

        Ok(reply)
    }

    async fn generate_group_preview(&self, group_name: &str, topic: &str) -> Result<String, GatewayError> {
        debug!(%group_name, "generate_group_preview: called");
        let ctx = PreviewPromptContext {
            group_name: group_name.to_string(),
            topic: topic.to_string(),
        };
        let prompt = self.render("group-preview", &ctx)?;

        let response = self
            .llm
            .generate(GenerateRequest {
                prompt,
                response_schema: None,
                max_output_tokens: PREVIEW_MAX_TOKENS,
            })
            .await?;

        // First non-empty line only
        Ok(response
            .text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;

    fn profile() -> StudentProfile {
        StudentProfile {
            id: 99,
            name: "Morgan".to_string(),
            subjects_can_help: vec!["World History".to_string()],
            subjects_help_needed: vec!["Calculus".to_string()],
            availability: vec!["Flexible".to_string()],
            study_method: "Problem Solving Sessions".to_string(),
            avatar_url: String::new(),
            is_friend: false,
        }
    }

    fn gateway(texts: &[&str]) -> GeminiGateway {
        GeminiGateway::new(Arc::new(MockLlmClient::texts(texts)), PromptLoader::embedded_only())
    }

    #[tokio::test]
    async fn test_find_matches_parses_candidates() {
        let gw = gateway(&[r#"{"matches": [
            {"id": 3, "matchReason": "Charlie can help with Calculus"},
            {"id": 6, "matchReason": "Fiona shares your study method"}
        ]}"#]);

        let candidates = gw.find_matches(&profile(), &[]).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, 3);
        assert!(!candidates[0].rationale.is_empty());
    }

    #[tokio::test]
    async fn test_find_matches_truncates_to_limit() {
        let gw = gateway(&[r#"{"matches": [
            {"id": 1, "matchReason": "a"},
            {"id": 2, "matchReason": "b"},
            {"id": 3, "matchReason": "c"},
            {"id": 4, "matchReason": "d"}
        ]}"#]);

        let candidates = gw.find_matches(&profile(), &[]).await.unwrap();
        assert_eq!(candidates.len(), MAX_MATCHES);
    }

    #[tokio::test]
    async fn test_find_matches_schema_violation_is_error() {
        let gw = gateway(&[r#"{"partners": []}"#]);
        let err = gw.find_matches(&profile(), &[]).await.unwrap_err();
        assert!(matches!(err, GatewayError::Schema { operation: "find_matches", .. }));
    }

    #[tokio::test]
    async fn test_generate_study_plan() {
        let gw = gateway(&[r#"{
            "keyTopics": ["Limits"],
            "discussionQuestions": ["Why?"],
            "practiceProblem": {"problem": "p", "solution": "s"}
        }"#]);

        let plan = gw.generate_study_plan("Calculus").await.unwrap();
        assert_eq!(plan.key_topics, vec!["Limits".to_string()]);
    }

    #[tokio::test]
    async fn test_chat_reply_keeps_valid_sender() {
        let gw = gateway(&[r#"{"sender": "Dana", "text": "Let's review."}"#]);
        let reply = gw
            .generate_chat_response(&[], &["Dana".to_string(), "Alex".to_string()], "Physics", "Morgan")
            .await
            .unwrap();
        assert_eq!(reply.sender, "Dana");
    }

    #[tokio::test]
    async fn test_chat_reply_never_attributed_to_user() {
        let gw = gateway(&[r#"{"sender": "Morgan", "text": "hi me"}"#]);
        let reply = gw
            .generate_chat_response(&[], &["Dana".to_string()], "Physics", "Morgan")
            .await
            .unwrap();
        assert_eq!(reply.sender, "Dana");
    }

    #[tokio::test]
    async fn test_chat_reply_unknown_sender_reattributed() {
        let gw = gateway(&[r#"{"sender": "Nobody", "text": "hello"}"#]);
        let reply = gw
            .generate_chat_response(&[], &["Dana".to_string()], "Physics", "Morgan")
            .await
            .unwrap();
        assert_eq!(reply.sender, "Dana");
    }

    #[tokio::test]
    async fn test_group_preview_takes_first_line() {
        let gw = gateway(&["\n  Working through heap invariants.\nsecond line"]);
        let line = gw.generate_group_preview("Data Structures Duo", "Data Structures").await.unwrap();
        assert_eq!(line, "Working through heap invariants.");
    }
}
