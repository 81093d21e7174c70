//! Boundary to the external study ledger, the system of record for sessions
//! and credit balances. The engine only ever talks to it through the
//! [`StudyLedger`] trait; [`http::HttpLedger`] is the production adapter.

mod http;

pub use http::HttpLedger;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Profile, SessionDraft, SessionRecord, Subject};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ledger rejected request ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("not authenticated with the ledger")]
    Unauthorized,
}

#[async_trait]
pub trait StudyLedger: Send + Sync {
    /// Persists one terminated cycle. The reconciler's sole write path.
    async fn submit_session(&self, draft: &SessionDraft) -> Result<SessionRecord, LedgerError>;

    /// Subjects available for the selector. The engine itself never validates
    /// subject ids beyond non-emptiness.
    async fn list_subjects(&self) -> Result<Vec<Subject>, LedgerError>;

    /// Best-effort motivational text for the given context. Callers fall back
    /// to the local pool on any failure.
    async fn motivational_phrase(&self, context: &str) -> Result<String, LedgerError>;

    /// Re-reads the aggregated profile so displayed totals catch up after a
    /// successful submission. Failures are swallowed by callers.
    async fn refresh_profile(&self) -> Result<Profile, LedgerError>;
}
