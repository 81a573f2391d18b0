//! Application state and view transitions
//!
//! Pure data and synchronous transitions. No rendering and no AI calls
//! here; the controller drives the async side and feeds results back in.

use tracing::debug;

use super::StudySession;
use crate::domain::{Match, ProfileDraft, ProfileValidationError, StudentProfile};

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Sign-in / sign-up gate
    #[default]
    Login,
    /// Landing page for a signed-in user
    Home,
    /// Profile form
    Profile,
    /// Combined match list
    Matches,
    /// Active collaboration space
    Collaboration,
}

impl View {
    /// Display name for headers
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Home",
            Self::Profile => "Profile",
            Self::Matches => "Matches",
            Self::Collaboration => "Collaboration",
        }
    }
}

/// Proof that a match search belongs to the current navigation epoch
///
/// Navigation bumps the epoch; applying a result with a stale ticket is a
/// no-op, so late responses never land on discarded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view
    pub view: View,
    /// Signed-in account profile (None before login)
    pub user: Option<StudentProfile>,
    /// Profile submitted for the current search (owns any session)
    pub profile: Option<StudentProfile>,
    /// In-progress profile form; survives failed searches
    pub draft: ProfileDraft,
    /// Combined match list (AI individuals + static groups)
    pub matches: Vec<Match>,
    /// Active collaboration session
    pub session: Option<StudySession>,
    /// A gateway call is in flight
    pub loading: bool,
    /// Dismissible error message
    pub error: Option<String>,

    search_epoch: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete login: seed the draft from the stored profile
    pub fn sign_in(&mut self, user: StudentProfile) {
        debug!(name = %user.name, "sign_in");
        self.draft = ProfileDraft::from_profile(&user);
        self.user = Some(user);
        self.view = View::Home;
        self.error = None;
    }

    /// Home -> Profile
    pub fn open_profile_form(&mut self) {
        self.view = View::Profile;
        self.error = None;
    }

    /// Validate the draft and start a search
    ///
    /// On success: returns the submitted profile and a ticket for
    /// [`Self::apply_search`], and enters the loading state. On validation
    /// failure the caller shows a transient button-level message; nothing
    /// else changes.
    pub fn begin_search(&mut self) -> Result<(StudentProfile, SearchTicket), ProfileValidationError> {
        let id = self
            .user
            .as_ref()
            .map(|u| u.id)
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
        let profile = self.draft.clone().into_profile(id)?;

        self.profile = Some(profile.clone());
        self.loading = true;
        self.error = None;
        debug!(epoch = self.search_epoch, "begin_search: search started");
        Ok((profile, SearchTicket(self.search_epoch)))
    }

    /// Apply a finished search
    ///
    /// Success lands on Matches with the combined list; failure returns to
    /// Profile with a dismissible error, keeping every entered field value.
    /// Results bearing a stale ticket are discarded; returns whether the
    /// result was applied.
    pub fn apply_search(&mut self, ticket: SearchTicket, result: Result<Vec<Match>, String>) -> bool {
        if ticket.0 != self.search_epoch {
            debug!(ticket = ticket.0, epoch = self.search_epoch, "apply_search: stale result discarded");
            return false;
        }
        self.loading = false;
        match result {
            Ok(matches) => {
                debug!(count = matches.len(), "apply_search: matches applied");
                self.matches = matches;
                self.view = View::Matches;
            }
            Err(message) => {
                debug!(%message, "apply_search: search failed");
                self.error = Some(message);
                self.view = View::Profile;
            }
        }
        true
    }

    /// Matches -> Collaboration for the match at `index` in the current list
    ///
    /// Any previous session is cleared first so nothing stale leaks into
    /// the new one.
    pub fn select_match(&mut self, index: usize) -> Option<&StudySession> {
        self.session = None;
        let profile = self.profile.as_ref()?;
        let m = self.matches.get(index)?;
        let session = StudySession::new(profile.clone(), m.clone());
        debug!(subject = %session.subject, "select_match: session created");
        self.session = Some(session);
        self.view = View::Collaboration;
        self.session.as_ref()
    }

    /// Collaboration -> Matches, destroying the session
    pub fn return_to_matches(&mut self) {
        self.session = None;
        self.error = None;
        self.view = View::Matches;
    }

    /// Any state -> Home, discarding session, matches, and in-flight work
    pub fn go_home(&mut self) {
        self.invalidate_inflight();
        self.matches.clear();
        self.session = None;
        self.profile = None;
        self.loading = false;
        self.error = None;
        self.view = View::Home;
    }

    /// Any state -> Login, additionally dropping the signed-in user
    pub fn logout(&mut self) {
        self.go_home();
        self.user = None;
        self.draft = ProfileDraft::default();
        self.view = View::Login;
    }

    /// Clear the dismissible error, returning to an interactive state
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// User's display name ("you" until a profile exists)
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .or(self.user.as_ref())
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "you".to_string())
    }

    fn invalidate_inflight(&mut self) {
        self.search_epoch = self.search_epoch.wrapping_add(1);
    }
}
