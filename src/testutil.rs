//! In-process fakes shared by the unit tests. No network anywhere.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::credits::credits_for_minutes;
use crate::ledger::{LedgerError, StudyLedger};
use crate::models::{Profile, SessionDraft, SessionRecord, Subject};
use crate::notify::{NoticeKind, Notifier};

fn server_error() -> LedgerError {
    LedgerError::Status {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".into(),
    }
}

#[derive(Default)]
pub struct FakeLedger {
    submissions: Mutex<Vec<SessionDraft>>,
    submission_attempts: AtomicUsize,
    profile_refreshes: AtomicUsize,
    fail_submissions: AtomicBool,
    fail_phrases: AtomicBool,
}

impl FakeLedger {
    pub fn submissions(&self) -> Vec<SessionDraft> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn submission_attempts(&self) -> usize {
        self.submission_attempts.load(Ordering::SeqCst)
    }

    pub fn profile_refreshes(&self) -> usize {
        self.profile_refreshes.load(Ordering::SeqCst)
    }

    pub fn fail_submissions(&self, fail: bool) {
        self.fail_submissions.store(fail, Ordering::SeqCst);
    }

    pub fn fail_phrases(&self, fail: bool) {
        self.fail_phrases.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StudyLedger for FakeLedger {
    async fn submit_session(&self, draft: &SessionDraft) -> Result<SessionRecord, LedgerError> {
        self.submission_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(server_error());
        }

        self.submissions.lock().unwrap().push(draft.clone());
        Ok(SessionRecord {
            id: Uuid::new_v4().to_string(),
            subject_id: draft.subject_id.clone(),
            duration_minutes: draft.duration_minutes,
            credits_earned: credits_for_minutes(draft.duration_minutes),
            created_at: Utc::now(),
        })
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, LedgerError> {
        Ok(vec![Subject {
            id: "subject-1".into(),
            name: "Mathematics".into(),
            color: "#3b82f6".into(),
        }])
    }

    async fn motivational_phrase(&self, context: &str) -> Result<String, LedgerError> {
        if self.fail_phrases.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(format!("Stay focused on {context}!"))
    }

    async fn refresh_profile(&self) -> Result<Profile, LedgerError> {
        self.profile_refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(Profile {
            full_name: "Test Student".into(),
            email: "student@example.com".into(),
            credits: 40,
            total_study_minutes: 240,
            created_at: Some(Utc::now()),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().unwrap().push((kind, message.to_string()));
    }
}
