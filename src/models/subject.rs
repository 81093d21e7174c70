use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subject as listed by `GET /subjects`. The timer treats the id as an
/// opaque foreign key; name and color exist for selector UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Aggregated profile returned by `GET /auth/profile`. The credit balance and
/// study total here are the source of truth; the engine only ever displays
/// them, it never computes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub credits: u32,
    pub total_study_minutes: u32,
    pub created_at: Option<DateTime<Utc>>,
}
