//! Session and state types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a user is in the purchase flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    /// Package menu shown, nothing picked yet.
    ChoosingPackage,
    /// Package picked, waiting for the in-game identifier.
    EnteringIdentifier { package_id: String },
}

/// Per-user conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            state: SessionState::Idle,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Package picked so far, if any.
    pub fn selected_package(&self) -> Option<&str> {
        match &self.state {
            SessionState::EnteringIdentifier { package_id } => Some(package_id),
            _ => None,
        }
    }

    /// Menu opened. A pending selection is kept so an extra menu tap does
    /// not lose it.
    pub fn open_menu(&mut self) {
        if self.is_idle() {
            self.set_state(SessionState::ChoosingPackage);
        }
    }

    /// Remember the package and wait for the identifier. Allowed from any
    /// state; a later pick replaces an earlier one.
    pub fn select_package(&mut self, package_id: impl Into<String>) {
        self.set_state(SessionState::EnteringIdentifier {
            package_id: package_id.into(),
        });
    }

    /// Back to `Idle`.
    pub fn reset(&mut self) {
        self.set_state(SessionState::Idle);
    }

    fn set_state(&mut self, state: SessionState) {
        self.state = state;
        self.updated_at = Utc::now();
    }
}
