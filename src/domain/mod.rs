//! Core domain types for StudySphere
//!
//! Pure data: profiles, matches, study plans, chat messages, and the
//! whiteboard stroke model. No I/O or AI calls here.

mod chat;
mod matching;
mod plan;
mod profile;
mod whiteboard;

pub use chat::{ChatMessage, ChatReply};
pub use matching::{Match, MatchCandidate, MatchedGroup, MatchedStudent};
pub use plan::{PracticeProblem, StudyPlan};
pub use profile::{ProfileDraft, ProfileValidationError, StudentProfile};
pub use whiteboard::{Stroke, Tool, Whiteboard};

/// Fallback subject when resolution finds nothing usable
pub const DEFAULT_SUBJECT: &str = "General Studies";

/// Resolve the common subject for an individual study pairing
///
/// Priority order:
/// 1. First subject the user needs help with that the partner can help with
/// 2. First subject the user can help with that the partner needs
/// 3. The user's first "needs help" subject
/// 4. The literal default label
pub fn resolve_subject(user: &StudentProfile, partner: &StudentProfile) -> String {
    user.subjects_help_needed
        .iter()
        .find(|s| partner.subjects_can_help.contains(s))
        .or_else(|| {
            user.subjects_can_help
                .iter()
                .find(|s| partner.subjects_help_needed.contains(s))
        })
        .or_else(|| user.subjects_help_needed.first())
        .cloned()
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
}

/// Resolve the session subject for any match variant
///
/// Groups always study their fixed topic; individuals go through
/// [`resolve_subject`].
pub fn session_subject(user: &StudentProfile, m: &Match) -> String {
    match m {
        Match::Student(s) => resolve_subject(user, &s.profile),
        Match::Group(g) => g.topic.clone(),
    }
}
