//! Match Directory: the static candidate roster and pure match filtering
//!
//! The roster is fixed mock data. Filtering is stateless, order-preserving,
//! and never mutates its input; re-filtering the same input is idempotent.

use crate::domain::{Match, MatchedGroup, StudentProfile};

/// Subjects offered in the profile form
pub const SUBJECTS: [&str; 10] = [
    "Calculus",
    "Linear Algebra",
    "Quantum Physics",
    "Organic Chemistry",
    "World History",
    "Data Structures",
    "Machine Learning",
    "Literary Analysis",
    "Microeconomics",
    "Art History",
];

/// Availability tags offered in the profile form
pub const AVAILABILITY_OPTIONS: [&str; 6] = [
    "Weekday Mornings",
    "Weekday Afternoons",
    "Weekday Evenings",
    "Weekend Mornings",
    "Weekend Afternoons",
    "Flexible",
];

/// Study methods offered in the profile form
pub const STUDY_METHODS: [&str; 5] = [
    "Quiet Co-working",
    "Active Discussion & Quizzing",
    "Problem Solving Sessions",
    "Document Collaboration",
    "Virtual Whiteboard",
];

fn student(
    id: i64,
    name: &str,
    can_help: &[&str],
    help_needed: &[&str],
    availability: &[&str],
    study_method: &str,
    is_friend: bool,
) -> StudentProfile {
    StudentProfile {
        id,
        name: name.to_string(),
        subjects_can_help: can_help.iter().map(|s| s.to_string()).collect(),
        subjects_help_needed: help_needed.iter().map(|s| s.to_string()).collect(),
        availability: availability.iter().map(|s| s.to_string()).collect(),
        study_method: study_method.to_string(),
        avatar_url: StudentProfile::avatar_for(name),
        is_friend,
    }
}

/// The candidate roster presented to the matching model
pub fn mock_profiles() -> Vec<StudentProfile> {
    vec![
        student(
            1,
            "Alex",
            &["Calculus", "Linear Algebra"],
            &["Quantum Physics", "Organic Chemistry"],
            &["Weekday Evenings", "Weekend Afternoons"],
            "Virtual Whiteboard",
            false,
        ),
        student(
            2,
            "Brenda",
            &["World History", "Literary Analysis"],
            &["Data Structures", "Machine Learning"],
            &["Weekday Mornings", "Flexible"],
            "Document Collaboration",
            false,
        ),
        student(
            3,
            "Charlie",
            &["Data Structures", "Machine Learning"],
            &["Calculus", "Microeconomics"],
            &["Weekend Mornings", "Weekend Afternoons"],
            "Problem Solving Sessions",
            false,
        ),
        student(
            4,
            "Dana",
            &["Quantum Physics", "Organic Chemistry"],
            &["Art History", "Literary Analysis"],
            &["Weekday Afternoons", "Weekday Evenings"],
            "Active Discussion & Quizzing",
            true,
        ),
        student(
            5,
            "Eli",
            &["Microeconomics", "Art History"],
            &["Linear Algebra"],
            &["Flexible"],
            "Quiet Co-working",
            false,
        ),
        student(
            6,
            "Fiona",
            &["Data Structures", "Calculus"],
            &["Machine Learning", "World History"],
            &["Weekday Evenings", "Weekend Mornings"],
            "Problem Solving Sessions",
            false,
        ),
        student(
            7,
            "George",
            &["Literary Analysis"],
            &["Quantum Physics", "Organic Chemistry"],
            &["Weekday Mornings", "Weekday Afternoons"],
            "Active Discussion & Quizzing",
            false,
        ),
    ]
}

/// The pre-built groups merged into every match list
///
/// Groups are static and not personalized per profile; whether they should
/// be ranked per-profile is a product decision, not taken here.
pub fn mock_groups() -> Vec<MatchedGroup> {
    let profiles = mock_profiles();
    vec![
        MatchedGroup {
            id: 101,
            name: "Data Structures Duo".to_string(),
            topic: "Data Structures".to_string(),
            members: vec![profiles[2].clone(), profiles[5].clone()],
            capacity: 3,
            rationale: "This focused pair is looking for one more member to master \
                        algorithms and data structures through intensive problem-solving \
                        sessions."
                .to_string(),
        },
        MatchedGroup {
            id: 102,
            name: "Quantum Quartet".to_string(),
            topic: "Quantum Physics".to_string(),
            members: vec![profiles[0].clone(), profiles[3].clone(), profiles[6].clone()],
            capacity: 4,
            rationale: "A dynamic group tackling the complexities of quantum mechanics. \
                        They have one spot left for a dedicated student who enjoys active \
                        discussions."
                .to_string(),
        },
    ]
}

/// How to partition a match list for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFilter {
    #[default]
    All,
    /// Matches involving a friend (individual friends or groups with one)
    Friends,
    /// Individual partners only
    Individuals,
    /// Groups with exactly two members
    Pairs,
    /// Groups with three or more members
    LargerGroups,
}

impl MatchFilter {
    pub fn matches(&self, m: &Match) -> bool {
        match self {
            Self::All => true,
            Self::Friends => m.involves_friend(),
            Self::Individuals => !m.is_group(),
            Self::Pairs => m.is_group() && m.member_count() == 2,
            Self::LargerGroups => m.is_group() && m.member_count() >= 3,
        }
    }
}

/// Filter a match list without mutating it, preserving order
pub fn filter_matches<'a>(matches: &'a [Match], filter: MatchFilter) -> Vec<&'a Match> {
    matches.iter().filter(|m| filter.matches(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchedStudent;

    fn sample_matches() -> Vec<Match> {
        let profiles = mock_profiles();
        let mut matches: Vec<Match> = profiles
            .iter()
            .take(3)
            .map(|p| {
                Match::Student(MatchedStudent {
                    profile: p.clone(),
                    rationale: "fits".to_string(),
                })
            })
            .collect();
        matches.push(Match::Student(MatchedStudent {
            profile: profiles[3].clone(), // Dana, friend
            rationale: "fits".to_string(),
        }));
        matches.extend(mock_groups().into_iter().map(Match::Group));
        matches
    }

    #[test]
    fn test_roster_shape() {
        let profiles = mock_profiles();
        assert_eq!(profiles.len(), 7);
        // Ids unique
        let mut ids: Vec<i64> = profiles.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 7);
        // Exactly one seeded friend
        assert_eq!(profiles.iter().filter(|p| p.is_friend).count(), 1);
    }

    #[test]
    fn test_groups_shape() {
        let groups = mock_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[1].members.len(), 3);
        assert_eq!(groups[0].open_seats(), 1);
    }

    #[test]
    fn test_pairs_filter_excludes_individuals_and_larger_groups() {
        let matches = sample_matches();
        let pairs = filter_matches(&matches, MatchFilter::Pairs);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].id(), 101);
        assert!(pairs.iter().all(|m| m.is_group() && m.member_count() == 2));
    }

    #[test]
    fn test_larger_groups_filter() {
        let matches = sample_matches();
        let larger = filter_matches(&matches, MatchFilter::LargerGroups);
        assert_eq!(larger.len(), 1);
        assert_eq!(larger[0].id(), 102);
    }

    #[test]
    fn test_individuals_filter_excludes_all_groups() {
        let matches = sample_matches();
        let individuals = filter_matches(&matches, MatchFilter::Individuals);
        assert_eq!(individuals.len(), 4);
        assert!(individuals.iter().all(|m| !m.is_group()));
    }

    #[test]
    fn test_friends_filter_spans_variants() {
        let matches = sample_matches();
        let friends = filter_matches(&matches, MatchFilter::Friends);
        // Dana individually, plus the Quantum Quartet (Dana is a member)
        let ids: Vec<i64> = friends.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![4, 102]);
    }

    #[test]
    fn test_filtering_preserves_order_and_is_idempotent() {
        let matches = sample_matches();
        let before: Vec<Match> = matches.clone();

        let all = filter_matches(&matches, MatchFilter::All);
        let ids: Vec<i64> = all.iter().map(|m| m.id()).collect();
        let expected: Vec<i64> = matches.iter().map(|m| m.id()).collect();
        assert_eq!(ids, expected);

        // Source untouched, refiltering gives the same result
        assert_eq!(matches, before);
        let again: Vec<i64> = filter_matches(&matches, MatchFilter::All)
            .iter()
            .map(|m| m.id())
            .collect();
        assert_eq!(again, expected);
    }
}
