use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /study-sessions`. Built by the reconciler from a
/// terminated cycle's elapsed time; never created speculatively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDraft {
    pub subject_id: String,
    pub duration_minutes: u32,
}

/// A session as echoed back by the ledger after a successful submission.
/// `credits_earned` here is authoritative; the client-side estimate is for
/// immediate feedback only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub subject_id: String,
    pub duration_minutes: u32,
    pub credits_earned: u32,
    pub created_at: DateTime<Utc>,
}
