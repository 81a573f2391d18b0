//! File-backed user store with simulated network latency

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::StudentProfile;

/// Simulated network round-trip for sign-up/login
const AUTH_DELAY: Duration = Duration::from_millis(500);

/// Simulated round-trip for profile updates
const UPDATE_DELAY: Duration = Duration::from_millis(200);

/// Errors from the auth store's file I/O
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read user store: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write user store: {0}")]
    Write(#[source] std::io::Error),

    #[error("User store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result of a sign-up or login attempt
///
/// Bad credentials and duplicate emails are outcomes, not errors; only
/// store I/O failures surface as [`AuthError`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    pub user: Option<StudentProfile>,
}

impl AuthOutcome {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
        }
    }

    fn accepted(message: impl Into<String>, user: StudentProfile) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: Some(user),
        }
    }
}

/// A stored account: profile plus the plaintext password simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    #[serde(flatten)]
    profile: StudentProfile,
    email: String,
    // Plaintext on purpose: this mock never leaves the local machine.
    password_simulation: String,
}

/// Plaintext JSON credential store
pub struct AuthStore {
    path: PathBuf,
}

impl AuthStore {
    /// Store backed by the given file (created on first sign-up)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the well-known platform location
    /// (`<data dir>/studysphere/users.json`)
    pub fn at_default_location() -> Self {
        let path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studysphere")
            .join("users.json");
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_users(&self) -> Result<Vec<StoredUser>, AuthError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(AuthError::Read)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_users(&self, users: &[StoredUser]) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(AuthError::Write)?;
        }
        let content = serde_json::to_string_pretty(users)?;
        fs::write(&self.path, content).map_err(AuthError::Write)
    }

    /// Create a new account with an empty study profile
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        debug!(%email, "sign_up: called");
        tokio::time::sleep(AUTH_DELAY).await;

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            debug!(%email, "sign_up: duplicate email");
            return Ok(AuthOutcome::rejected("An account with this email already exists."));
        }

        let profile = StudentProfile {
            id: Utc::now().timestamp_millis(),
            name: name.to_string(),
            subjects_can_help: Vec::new(),
            subjects_help_needed: Vec::new(),
            availability: Vec::new(),
            study_method: String::new(),
            avatar_url: StudentProfile::avatar_for(name),
            is_friend: false,
        };

        users.push(StoredUser {
            profile: profile.clone(),
            email: email.to_string(),
            password_simulation: password.to_string(),
        });
        self.save_users(&users)?;

        Ok(AuthOutcome::accepted("Signup successful!", profile))
    }

    /// Check credentials against the stored password simulation
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        debug!(%email, "login: called");
        tokio::time::sleep(AUTH_DELAY).await;

        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password_simulation == password);

        match user {
            Some(u) => Ok(AuthOutcome::accepted("Login successful!", u.profile.clone())),
            None => Ok(AuthOutcome::rejected("Invalid email or password.")),
        }
    }

    /// Persist profile changes, preserving the stored password
    pub async fn update_profile(&self, updated: &StudentProfile) -> Result<StudentProfile, AuthError> {
        debug!(id = updated.id, "update_profile: called");
        tokio::time::sleep(UPDATE_DELAY).await;

        let mut users = self.load_users()?;
        if let Some(user) = users.iter_mut().find(|u| u.profile.id == updated.id) {
            user.profile = updated.clone();
            self.save_users(&users)?;
        }
        Ok(updated.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, AuthStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::new(dir.path().join("users.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_sign_up_then_login() {
        let (_dir, store) = store();

        let outcome = store.sign_up("Morgan", "morgan@example.com", "hunter2").await.unwrap();
        assert!(outcome.success);
        let user = outcome.user.unwrap();
        assert_eq!(user.name, "Morgan");
        assert!(user.subjects_can_help.is_empty());

        let outcome = store.login("morgan@example.com", "hunter2").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.user.unwrap().name, "Morgan");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_case_insensitive() {
        let (_dir, store) = store();
        store.sign_up("Morgan", "morgan@example.com", "a").await.unwrap();

        let outcome = store.sign_up("Other", "MORGAN@example.com", "b").await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.message.contains("already exists"));
        assert!(outcome.user.is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let (_dir, store) = store();
        store.sign_up("Morgan", "morgan@example.com", "right").await.unwrap();

        let outcome = store.login("morgan@example.com", "wrong").await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.user.is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (_dir, store) = store();
        let outcome = store.login("nobody@example.com", "x").await.unwrap();
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn test_update_profile_preserves_password() {
        let (_dir, store) = store();
        let user = store
            .sign_up("Morgan", "morgan@example.com", "hunter2")
            .await
            .unwrap()
            .user
            .unwrap();

        let mut updated = user.clone();
        updated.subjects_help_needed = vec!["Calculus".to_string()];
        store.update_profile(&updated).await.unwrap();

        let outcome = store.login("morgan@example.com", "hunter2").await.unwrap();
        assert!(outcome.success);
        assert_eq!(
            outcome.user.unwrap().subjects_help_needed,
            vec!["Calculus".to_string()]
        );
    }

    #[tokio::test]
    async fn test_store_is_plaintext_json_on_disk() {
        let (_dir, store) = store();
        store.sign_up("Morgan", "morgan@example.com", "hunter2").await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        // The simulation stores the password verbatim
        assert!(raw.contains("hunter2"));
        assert!(raw.contains("password_simulation"));
    }
}
