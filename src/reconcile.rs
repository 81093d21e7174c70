//! Turns a terminated cycle's elapsed time into a durable ledger record plus
//! a locally displayed credit estimate.
//!
//! Persistence is at-most-once by design: a failed submission notifies the
//! user and is never retried or re-queued, because the timer has already
//! reset and must stay usable for the next cycle.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::credits::credits_for_minutes;
use crate::ledger::StudyLedger;
use crate::models::SessionDraft;
use crate::notify::{NoticeKind, Notifier};

#[derive(Clone)]
pub struct Reconciler {
    ledger: Arc<dyn StudyLedger>,
    notifier: Arc<dyn Notifier>,
}

impl Reconciler {
    pub fn new(ledger: Arc<dyn StudyLedger>, notifier: Arc<dyn Notifier>) -> Self {
        Self { ledger, notifier }
    }

    /// Submits one cycle's elapsed time to the ledger. No-op below one whole
    /// minute, which also guards against double invocation with sub-minute
    /// residue. Transport failure never propagates to the caller.
    pub async fn reconcile(&self, subject_id: &str, elapsed_seconds: u32) {
        let duration_minutes = elapsed_seconds / 60;
        if duration_minutes < 1 {
            debug!("discarding sub-minute cycle ({elapsed_seconds}s) for subject {subject_id}");
            return;
        }

        let credits_estimate = credits_for_minutes(duration_minutes);
        let draft = SessionDraft {
            subject_id: subject_id.to_string(),
            duration_minutes,
        };

        match self.ledger.submit_session(&draft).await {
            Ok(record) => {
                info!(
                    "recorded session {} ({} min, estimated {} credits)",
                    record.id, duration_minutes, credits_estimate
                );
                self.notifier.notify(
                    NoticeKind::Success,
                    &format!(
                        "{duration_minutes} minutes of study recorded. You earned {credits_estimate} credits!"
                    ),
                );

                // Displayed aggregates catch up on a best-effort basis only.
                match self.ledger.refresh_profile().await {
                    Ok(profile) => debug!("ledger balance now {} credits", profile.credits),
                    Err(err) => warn!("profile refresh after submission failed: {err}"),
                }
            }
            Err(err) => {
                error!(
                    "failed to record {duration_minutes} min session for subject {subject_id}: {err}"
                );
                self.notifier.notify(
                    NoticeKind::Warning,
                    "Session completed but could not be recorded.",
                );
            }
        }
    }
}
