//! AI Gateway: typed operations over the generative model
//!
//! The [`StudyGateway`] trait is the seam between the session controller and
//! the model. The live implementation renders prompts, constrains responses
//! to JSON schemas, and parses them into domain types; tests inject a
//! deterministic fake instead.

mod error;
mod live;
mod schema;

pub use error::GatewayError;
pub use live::GeminiGateway;

use async_trait::async_trait;

use crate::domain::{ChatMessage, ChatReply, MatchCandidate, PracticeProblem, StudentProfile, StudyPlan};

/// Maximum number of partner candidates requested per search
pub const MAX_MATCHES: usize = 3;

/// The four AI operations the client depends on, plus the group-card
/// activity preview
///
/// Failure policy: callers catch every error, map it to a short user-facing
/// message, and stay interactive. No operation retries above the transport
/// layer - the user re-triggers the action.
#[async_trait]
pub trait StudyGateway: Send + Sync {
    /// Select at most [`MAX_MATCHES`] compatible partners from the roster
    ///
    /// Returns candidate ids with rationales. The caller re-joins ids
    /// against the roster and silently drops ids with no roster entry.
    async fn find_matches(
        &self,
        profile: &StudentProfile,
        roster: &[StudentProfile],
    ) -> Result<Vec<MatchCandidate>, GatewayError>;

    /// Produce one study plan for a subject (no partial plans)
    async fn generate_study_plan(&self, subject: &str) -> Result<StudyPlan, GatewayError>;

    /// Produce a replacement practice problem, independent of plan
    /// regeneration
    async fn generate_practice_problem(&self, subject: &str) -> Result<PracticeProblem, GatewayError>;

    /// Produce exactly one next chat message from a named participant
    ///
    /// The reply is never attributed to the user; implementations
    /// re-attribute unknown senders to the first participant.
    async fn generate_chat_response(
        &self,
        history: &[ChatMessage],
        participants: &[String],
        subject: &str,
        user_name: &str,
    ) -> Result<ChatReply, GatewayError>;

    /// One line of simulated group activity for a match-list group card
    async fn generate_group_preview(&self, group_name: &str, topic: &str) -> Result<String, GatewayError>;
}
