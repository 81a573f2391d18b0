//! Collaboration session: the live state of one study pairing
//!
//! Ephemeral by design - created when the user starts studying with a
//! match, destroyed on return to the match list. Nothing here persists.

use rand::Rng;

use crate::domain::{ChatMessage, Match, StudentProfile, StudyPlan, Whiteboard, session_subject};

/// Scripted replies used when chat generation fails, so the transcript
/// never stalls
const FALLBACK_LINES: [&str; 3] = [
    "Sorry, my connection dropped for a second - could you say that again?",
    "Hang on, I'm just pulling up my notes. What were you saying?",
    "Hmm, I missed that. Can you rephrase it?",
];

/// The active collaboration context
#[derive(Debug)]
pub struct StudySession {
    /// Who the user is studying with
    pub partner: Match,
    /// Resolved common subject
    pub subject: String,
    /// The profile that owns this session
    pub user: StudentProfile,
    /// Append-only chat transcript
    pub transcript: Vec<ChatMessage>,
    /// Current study plan (None until first generation succeeds)
    pub plan: Option<StudyPlan>,
    /// Shared drawing surface
    pub whiteboard: Whiteboard,
    /// An outbound chat request is awaiting its reply; sending is blocked
    /// until it resolves
    pub chat_in_flight: bool,
}

impl StudySession {
    /// Create a session for a selected match, resolving the subject
    pub fn new(user: StudentProfile, partner: Match) -> Self {
        let subject = session_subject(&user, &partner);
        let whiteboard = Whiteboard::for_subject(&subject);
        Self {
            partner,
            subject,
            user,
            transcript: Vec::new(),
            plan: None,
            whiteboard,
            chat_in_flight: false,
        }
    }

    /// Names of everyone on the other side of the session
    pub fn participants(&self) -> Vec<String> {
        self.partner.participant_names()
    }

    /// Append a message to the transcript
    pub fn push_message(&mut self, sender: impl Into<String>, text: impl Into<String>) {
        self.transcript.push(ChatMessage::now(sender, text));
    }

    /// Scripted fallback appended when chat generation fails
    pub fn fallback_reply(&self) -> ChatMessage {
        let sender = self
            .participants()
            .into_iter()
            .next()
            .unwrap_or_else(|| "Study partner".to_string());
        let line = FALLBACK_LINES[rand::rng().random_range(0..FALLBACK_LINES.len())];
        ChatMessage::now(sender, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchedGroup, MatchedStudent};

    fn user() -> StudentProfile {
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

    fn partner() -> Match {
        Match::Student(MatchedStudent {
            profile: StudentProfile {
                id: 3,
                name: "Charlie".to_string(),
                subjects_can_help: vec!["Calculus".to_string()],
                subjects_help_needed: vec![],
                availability: vec![],
                study_method: String::new(),
                avatar_url: String::new(),
                is_friend: false,
            },
            rationale: "fits".to_string(),
        })
    }

    #[test]
    fn test_new_session_resolves_subject_and_seeds_whiteboard() {
        let session = StudySession::new(user(), partner());
        assert_eq!(session.subject, "Calculus");
        assert!(session.whiteboard.notes.contains("Calculus"));
        assert!(session.transcript.is_empty());
        assert!(session.plan.is_none());
        assert!(!session.chat_in_flight);
    }

    #[test]
    fn test_group_session_uses_topic_and_lists_members() {
        let group = Match::Group(MatchedGroup {
            id: 102,
            name: "Quantum Quartet".to_string(),
            topic: "Quantum Physics".to_string(),
            members: vec![
                StudentProfile {
                    name: "Dana".to_string(),
                    ..user()
                },
                StudentProfile {
                    name: "Alex".to_string(),
                    ..user()
                },
            ],
            capacity: 4,
            rationale: "r".to_string(),
        });
        let session = StudySession::new(user(), group);
        assert_eq!(session.subject, "Quantum Physics");
        assert_eq!(session.participants(), vec!["Dana", "Alex"]);
    }

    #[test]
    fn test_transcript_append_order() {
        let mut session = StudySession::new(user(), partner());
        session.push_message("Morgan", "first");
        session.push_message("Charlie", "second");
        let texts: Vec<&str> = session.transcript.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_fallback_reply_comes_from_participant() {
        let session = StudySession::new(user(), partner());
        let reply = session.fallback_reply();
        assert_eq!(reply.sender, "Charlie");
        assert!(FALLBACK_LINES.contains(&reply.text.as_str()));
    }
}
