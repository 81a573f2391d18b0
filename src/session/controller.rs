//! Session controller: drives async gateway operations against the state
//!
//! Every operation follows the same failure policy: gateway errors become
//! short inline messages and the state stays interactive. Nothing here
//! panics or retries on its own.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::AppState;
use crate::domain::{Match, MatchCandidate, MatchedGroup, MatchedStudent, ProfileValidationError, StudentProfile};
use crate::gateway::StudyGateway;

/// Re-join model candidates against the roster
///
/// Candidates whose id has no roster entry are silently dropped; order of
/// the model's ranking is preserved.
pub fn join_candidates(candidates: Vec<MatchCandidate>, roster: &[StudentProfile]) -> Vec<MatchedStudent> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let profile = roster.iter().find(|p| p.id == candidate.id);
            if profile.is_none() {
                debug!(id = candidate.id, "join_candidates: dropping unknown candidate id");
            }
            profile.map(|p| MatchedStudent {
                profile: p.clone(),
                rationale: candidate.rationale,
            })
        })
        .collect()
}

/// Orchestrates gateway calls and state transitions
pub struct SessionController {
    gateway: Arc<dyn StudyGateway>,
    roster: Vec<StudentProfile>,
    groups: Vec<MatchedGroup>,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn StudyGateway>, roster: Vec<StudentProfile>, groups: Vec<MatchedGroup>) -> Self {
        Self { gateway, roster, groups }
    }

    pub fn roster(&self) -> &[StudentProfile] {
        &self.roster
    }

    /// Submit the profile draft and run a match search
    ///
    /// Validation failure is returned to the caller for a transient
    /// button-level message. Gateway failure routes through the state
    /// machine back to the Profile view.
    pub async fn submit_profile(&self, state: &mut AppState) -> Result<(), ProfileValidationError> {
        let (profile, ticket) = state.begin_search()?;

        let result = match self.gateway.find_matches(&profile, &self.roster).await {
            Ok(candidates) => {
                let individuals = join_candidates(candidates, &self.roster);
                Ok(self.combine(individuals))
            }
            Err(e) => {
                warn!(error = %e, "submit_profile: match search failed");
                Err(e.user_message("find matches"))
            }
        };

        state.apply_search(ticket, result);
        Ok(())
    }

    /// Merge AI-ranked individuals with the static group roster
    ///
    /// Individuals keep the model's order; groups follow, un-personalized.
    fn combine(&self, individuals: Vec<MatchedStudent>) -> Vec<Match> {
        individuals
            .into_iter()
            .map(Match::Student)
            .chain(self.groups.iter().cloned().map(Match::Group))
            .collect()
    }

    /// Generate (or regenerate) the study plan for the active session
    ///
    /// On failure the previous plan, if any, is kept and an inline error
    /// is set.
    pub async fn load_study_plan(&self, state: &mut AppState) {
        let Some(subject) = state.session.as_ref().map(|s| s.subject.clone()) else {
            return;
        };

        state.loading = true;
        let result = self.gateway.generate_study_plan(&subject).await;
        state.loading = false;

        let Some(session) = state.session.as_mut() else {
            debug!("load_study_plan: session gone, dropping plan");
            return;
        };
        match result {
            Ok(plan) => {
                session.plan = Some(plan);
                state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "load_study_plan: failed");
                state.error = Some(e.user_message("generate a study plan"));
            }
        }
    }

    /// Replace only the practice problem of the current plan
    pub async fn new_practice_problem(&self, state: &mut AppState) {
        let Some(subject) = state
            .session
            .as_ref()
            .filter(|s| s.plan.is_some())
            .map(|s| s.subject.clone())
        else {
            return;
        };

        state.loading = true;
        let result = self.gateway.generate_practice_problem(&subject).await;
        state.loading = false;

        let Some(session) = state.session.as_mut() else {
            return;
        };
        match result {
            Ok(problem) => {
                if let Some(plan) = session.plan.as_mut() {
                    plan.replace_problem(problem);
                }
                state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "new_practice_problem: failed");
                state.error = Some(e.user_message("generate a new problem"));
            }
        }
    }

    /// Send a chat message and append the simulated reply
    ///
    /// Returns false without side effects while a prior send is still in
    /// flight. Replies are appended in resolution order; failure degrades
    /// to a scripted fallback so the transcript never stalls.
    pub async fn send_chat_message(&self, state: &mut AppState, text: &str) -> bool {
        let user_name = state.display_name();
        let Some(session) = state.session.as_mut() else {
            return false;
        };
        if session.chat_in_flight {
            debug!("send_chat_message: blocked, prior message in flight");
            return false;
        }

        session.chat_in_flight = true;
        session.push_message(user_name.clone(), text);

        let history = session.transcript.clone();
        let participants = session.participants();
        let subject = session.subject.clone();

        let result = self
            .gateway
            .generate_chat_response(&history, &participants, &subject, &user_name)
            .await;

        let Some(session) = state.session.as_mut() else {
            debug!("send_chat_message: session gone, dropping reply");
            return false;
        };
        session.chat_in_flight = false;
        match result {
            Ok(reply) => session.push_message(reply.sender, reply.text),
            Err(e) => {
                warn!(error = %e, "send_chat_message: degrading to scripted fallback");
                let fallback = session.fallback_reply();
                session.transcript.push(fallback);
            }
        }
        true
    }

    /// Start background polling of group-card activity previews
    ///
    /// The poller owns a task handle and aborts it on drop, so leaving the
    /// matches view cannot leak a timer into discarded state.
    pub fn spawn_preview_poller(&self, interval: Duration) -> PreviewPoller {
        PreviewPoller::spawn(self.gateway.clone(), self.groups.clone(), interval)
    }
}

/// Periodic generator of one-line group activity previews
pub struct PreviewPoller {
    previews: Arc<Mutex<HashMap<i64, String>>>,
    handle: JoinHandle<()>,
}

impl PreviewPoller {
    fn spawn(gateway: Arc<dyn StudyGateway>, groups: Vec<MatchedGroup>, interval: Duration) -> Self {
        let previews: Arc<Mutex<HashMap<i64, String>>> = Arc::new(Mutex::new(HashMap::new()));
        let shared = previews.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                for group in &groups {
                    match gateway.generate_group_preview(&group.name, &group.topic).await {
                        Ok(line) if !line.is_empty() => {
                            if let Ok(mut map) = shared.lock() {
                                map.insert(group.id, line);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => debug!(error = %e, group = %group.name, "preview poll failed"),
                    }
                }
            }
        });

        Self { previews, handle }
    }

    /// Latest preview line per group id
    pub fn latest(&self) -> HashMap<i64, String> {
        self.previews.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Drop for PreviewPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
