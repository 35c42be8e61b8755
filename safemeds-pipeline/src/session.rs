//! Session state: the only shared mutable resource in the system.
//!
//! The safety profile lives here for the session's duration and changes
//! only through explicit toggles. A pipeline run reads it exactly once, as
//! a value snapshot, so a toggle mid-run can never tear a run's view of
//! the profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use safemeds_core::models::SafetyProfile;

/// Per-session state: the patient safety profile plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Unique session identifier.
    pub session_id: String,
    /// When this session was created.
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp.
    pub last_activity: DateTime<Utc>,
    /// The patient's safety constraints.
    profile: SafetyProfile,
    /// Total queries made in this session.
    pub queries_made: u64,
}

impl SessionContext {
    /// Create a fresh session with the default (permissive) profile.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            last_activity: now,
            profile: SafetyProfile::default(),
            queries_made: 0,
        }
    }

    /// Value snapshot of the profile for one pipeline run.
    pub fn profile_snapshot(&self) -> SafetyProfile {
        self.profile
    }

    /// Toggle the pregnancy-risk constraint.
    pub fn set_pregnancy_risk(&mut self, value: bool) {
        self.profile.pregnancy_risk = value;
        self.last_activity = Utc::now();
    }

    /// Toggle prescription access.
    pub fn set_prescription_only_ok(&mut self, value: bool) {
        self.profile.prescription_only_ok = value;
        self.last_activity = Utc::now();
    }

    /// Record a query.
    pub fn record_query(&mut self) {
        self.queries_made += 1;
        self.last_activity = Utc::now();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
