//! AI-generated study plan types

use serde::{Deserialize, Serialize};

/// A practice problem with its worked solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeProblem {
    pub problem: String,
    pub solution: String,
}

/// Structured study plan for one session subject
///
/// Regenerating the practice problem replaces only that field; topics and
/// questions stay as generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    #[serde(rename = "keyTopics")]
    pub key_topics: Vec<String>,

    #[serde(rename = "discussionQuestions")]
    pub discussion_questions: Vec<String>,

    #[serde(rename = "practiceProblem")]
    pub practice_problem: PracticeProblem,
}

impl StudyPlan {
    /// Swap in a freshly generated practice problem
    pub fn replace_problem(&mut self, problem: PracticeProblem) {
        self.practice_problem = problem;
    }
}
