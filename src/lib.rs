pub mod credits;
pub mod error;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod phrases;
pub mod reconcile;
pub mod settings;
pub mod timer;

#[cfg(test)]
mod testutil;

pub use error::EngineError;
pub use ledger::{HttpLedger, LedgerError, StudyLedger};
pub use models::{Profile, SessionDraft, SessionRecord, Subject};
pub use notify::{LogNotifier, NoticeKind, Notifier};
pub use reconcile::Reconciler;
pub use settings::{LedgerSettings, SettingsStore};
pub use timer::{FocusController, TimerPhase, TimerSnapshot, TimerState};
