//! Injected notifier capability. Transition handlers report user-facing
//! events through this seam instead of talking to a UI toolkit directly, so
//! the state machine can be exercised without a UI harness.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    /// Motivational text for the focus display, not an event outcome.
    Motivation,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Default notifier that routes everything through the `log` facade. Useful
/// for headless embedding and tests; UIs supply their own implementation.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Warning => log::warn!("{message}"),
            NoticeKind::Info | NoticeKind::Success => log::info!("{message}"),
            NoticeKind::Motivation => log::debug!("{message}"),
        }
    }
}
