//! Match types: the individual/group sum type and the AI candidate shape

use serde::{Deserialize, Serialize};

use super::StudentProfile;

/// An individual partner with the model's compatibility rationale attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedStudent {
    #[serde(flatten)]
    pub profile: StudentProfile,

    /// Free-text justification for the pairing
    #[serde(rename = "matchReason")]
    pub rationale: String,
}

/// A pre-built study group offered as a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedGroup {
    pub id: i64,
    pub name: String,
    pub topic: String,
    pub members: Vec<StudentProfile>,
    pub capacity: usize,
    #[serde(rename = "matchReason")]
    pub rationale: String,
}

impl MatchedGroup {
    /// Open seats remaining in the group
    pub fn open_seats(&self) -> usize {
        self.capacity.saturating_sub(self.members.len())
    }
}

/// A study-session candidate: exactly one of an individual or a group
///
/// An explicit sum type so callers discriminate with `match` instead of
/// probing for a members field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Match {
    Group(MatchedGroup),
    Student(MatchedStudent),
}

impl Match {
    pub fn id(&self) -> i64 {
        match self {
            Self::Student(s) => s.profile.id,
            Self::Group(g) => g.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Student(s) => &s.profile.name,
            Self::Group(g) => &g.name,
        }
    }

    pub fn rationale(&self) -> &str {
        match self {
            Self::Student(s) => &s.rationale,
            Self::Group(g) => &g.rationale,
        }
    }

    /// Number of people on the other side of the session
    pub fn member_count(&self) -> usize {
        match self {
            Self::Student(_) => 1,
            Self::Group(g) => g.members.len(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Friend matches: an individual friend, or a group containing one
    pub fn involves_friend(&self) -> bool {
        match self {
            Self::Student(s) => s.profile.is_friend,
            Self::Group(g) => g.members.iter().any(|m| m.is_friend),
        }
    }

    /// Names of the participants the user would study with
    pub fn participant_names(&self) -> Vec<String> {
        match self {
            Self::Student(s) => vec![s.profile.name.clone()],
            Self::Group(g) => g.members.iter().map(|m| m.name.clone()).collect(),
        }
    }
}

/// One entry of the model's match selection, before roster re-join
///
/// Both fields are load-bearing: `id` must exist in the caller's roster and
/// `rationale` is a required string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub id: i64,
    #[serde(rename = "matchReason")]
    pub rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, name: &str, is_friend: bool) -> MatchedStudent {
        MatchedStudent {
            profile: StudentProfile {
                id,
                name: name.to_string(),
                subjects_can_help: vec![],
                subjects_help_needed: vec![],
                availability: vec![],
                study_method: String::new(),
                avatar_url: String::new(),
                is_friend,
            },
            rationale: "compatible schedules".to_string(),
        }
    }

    fn group(id: i64, member_names: &[&str]) -> MatchedGroup {
        MatchedGroup {
            id,
            name: "Group".to_string(),
            topic: "Data Structures".to_string(),
            members: member_names
                .iter()
                .map(|n| student(0, n, false).profile)
                .collect(),
            capacity: member_names.len() + 1,
            rationale: "one seat left".to_string(),
        }
    }

    #[test]
    fn test_match_is_exactly_one_variant() {
        let m = Match::Student(student(1, "Alex", false));
        assert!(!m.is_group());
        assert_eq!(m.member_count(), 1);

        let m = Match::Group(group(101, &["Charlie", "Fiona"]));
        assert!(m.is_group());
        assert_eq!(m.member_count(), 2);
    }

    #[test]
    fn test_match_accessors() {
        let m = Match::Group(group(101, &["Charlie", "Fiona"]));
        assert_eq!(m.id(), 101);
        assert_eq!(m.display_name(), "Group");
        assert_eq!(m.rationale(), "one seat left");
        assert_eq!(m.participant_names(), vec!["Charlie", "Fiona"]);
    }

    #[test]
    fn test_involves_friend() {
        assert!(Match::Student(student(1, "Dana", true)).involves_friend());
        assert!(!Match::Student(student(2, "Eli", false)).involves_friend());

        let mut g = group(101, &["Charlie"]);
        assert!(!Match::Group(g.clone()).involves_friend());
        g.members.push(student(3, "Dana", true).profile);
        assert!(Match::Group(g).involves_friend());
    }

    #[test]
    fn test_open_seats_saturates() {
        let mut g = group(101, &["A", "B"]);
        assert_eq!(g.open_seats(), 1);
        g.capacity = 1;
        assert_eq!(g.open_seats(), 0);
    }

    #[test]
    fn test_candidate_deserializes_gateway_shape() {
        let json = r#"{"id": 3, "matchReason": "Charlie can help with Calculus"}"#;
        let c: MatchCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, 3);
        assert!(!c.rationale.is_empty());
    }
}
