//! Student profiles and the pre-submission draft form

use serde::{Deserialize, Serialize};

/// A student's study profile
///
/// Created at profile submission and immutable for the duration of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: i64,

    pub name: String,

    /// Subjects this student can tutor others in
    #[serde(rename = "subjectsCanHelp")]
    pub subjects_can_help: Vec<String>,

    /// Subjects this student wants help with
    #[serde(rename = "subjectsHelpNeeded")]
    pub subjects_help_needed: Vec<String>,

    /// Availability tags, e.g. "Weekday Evenings"
    pub availability: Vec<String>,

    /// Preferred study method, e.g. "Problem Solving Sessions"
    #[serde(rename = "studyMethod")]
    pub study_method: String,

    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,

    /// Marked as a friend of the signed-in user
    #[serde(rename = "isFriend", default)]
    pub is_friend: bool,
}

impl StudentProfile {
    /// Deterministic avatar URL for a display name
    pub fn avatar_for(name: &str) -> String {
        let seed = name.trim().to_lowercase().replace(char::is_whitespace, "-");
        format!("https://picsum.photos/seed/{}/200", seed)
    }
}

/// Which draft fields failed validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileValidationError {
    pub missing_name: bool,
    pub missing_can_help: bool,
    pub missing_help_needed: bool,
    pub missing_availability: bool,
    pub missing_study_method: bool,
}

impl ProfileValidationError {
    pub fn is_empty(&self) -> bool {
        !(self.missing_name
            || self.missing_can_help
            || self.missing_help_needed
            || self.missing_availability
            || self.missing_study_method)
    }
}

impl std::fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Please fill out all sections of the form.")
    }
}

impl std::error::Error for ProfileValidationError {}

/// In-progress profile form state
///
/// Survives a failed match search so the user never re-enters their
/// selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub subjects_can_help: Vec<String>,
    pub subjects_help_needed: Vec<String>,
    pub availability: Vec<String>,
    pub study_method: String,
}

impl ProfileDraft {
    /// Toggle a value in a multi-select list (checkbox semantics)
    pub fn toggle(list: &mut Vec<String>, value: &str) {
        if let Some(pos) = list.iter().position(|v| v == value) {
            list.remove(pos);
        } else {
            list.push(value.to_string());
        }
    }

    /// Validate the draft, reporting every incomplete field at once
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let err = ProfileValidationError {
            missing_name: self.name.trim().is_empty(),
            missing_can_help: self.subjects_can_help.is_empty(),
            missing_help_needed: self.subjects_help_needed.is_empty(),
            missing_availability: self.availability.is_empty(),
            missing_study_method: self.study_method.trim().is_empty(),
        };
        if err.is_empty() { Ok(()) } else { Err(err) }
    }

    /// Build an immutable profile from a valid draft
    pub fn into_profile(self, id: i64) -> Result<StudentProfile, ProfileValidationError> {
        self.validate()?;
        let avatar_url = StudentProfile::avatar_for(&self.name);
        Ok(StudentProfile {
            id,
            name: self.name,
            subjects_can_help: self.subjects_can_help,
            subjects_help_needed: self.subjects_help_needed,
            availability: self.availability,
            study_method: self.study_method,
            avatar_url,
            is_friend: false,
        })
    }

    /// Re-seed a draft from an existing profile (profile re-submission)
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            name: profile.name.clone(),
            subjects_can_help: profile.subjects_can_help.clone(),
            subjects_help_needed: profile.subjects_help_needed.clone(),
            availability: profile.availability.clone(),
            study_method: profile.study_method.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ProfileDraft {
        ProfileDraft {
            name: "Morgan".to_string(),
            subjects_can_help: vec!["World History".to_string()],
            subjects_help_needed: vec!["Calculus".to_string()],
            availability: vec!["Flexible".to_string()],
            study_method: "Problem Solving Sessions".to_string(),
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut list = Vec::new();
        ProfileDraft::toggle(&mut list, "Calculus");
        assert_eq!(list, vec!["Calculus".to_string()]);
        ProfileDraft::toggle(&mut list, "Calculus");
        assert!(list.is_empty());
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        let draft = ProfileDraft::default();
        let err = draft.validate().unwrap_err();
        assert!(err.missing_name);
        assert!(err.missing_can_help);
        assert!(err.missing_help_needed);
        assert!(err.missing_availability);
        assert!(err.missing_study_method);
    }

    #[test]
    fn test_validate_complete_draft() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn test_into_profile_builds_avatar() {
        let profile = complete_draft().into_profile(42).unwrap();
        assert_eq!(profile.id, 42);
        assert_eq!(profile.avatar_url, "https://picsum.photos/seed/morgan/200");
        assert!(!profile.is_friend);
    }

    #[test]
    fn test_avatar_for_normalizes_whitespace() {
        assert_eq!(
            StudentProfile::avatar_for("Ada  Lovelace"),
            "https://picsum.photos/seed/ada--lovelace/200"
        );
    }

    #[test]
    fn test_draft_round_trips_through_profile() {
        let draft = complete_draft();
        let profile = draft.clone().into_profile(7).unwrap();
        assert_eq!(ProfileDraft::from_profile(&profile), draft);
    }
}
