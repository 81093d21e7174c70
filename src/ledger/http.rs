use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{LedgerError, StudyLedger};
use crate::models::{Profile, SessionDraft, SessionRecord, Subject};
use crate::settings::LedgerSettings;

#[derive(Debug, Serialize)]
struct PhraseRequest<'a> {
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct PhraseResponse {
    phrase: String,
}

/// REST adapter for the study ledger.
///
/// The bearer credential is scoped to this instance with an explicit
/// lifecycle: supplied at construction or via [`set_credential`] on login,
/// removed via [`clear_credential`] on logout. Nothing here mutates
/// process-global client state.
///
/// [`set_credential`]: HttpLedger::set_credential
/// [`clear_credential`]: HttpLedger::clear_credential
pub struct HttpLedger {
    client: Client,
    base_url: String,
    bearer_token: RwLock<Option<String>>,
}

impl HttpLedger {
    pub fn new(settings: &LedgerSettings) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            bearer_token: RwLock::new(settings.bearer_token.clone()),
        })
    }

    pub fn set_credential(&self, token: impl Into<String>) {
        *self.bearer_token.write().unwrap() = Some(token.into());
    }

    pub fn clear_credential(&self) {
        *self.bearer_token.write().unwrap() = None;
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer_token.read().unwrap().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, LedgerError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(LedgerError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(LedgerError::Status { status, body })
            }
        }
    }
}

#[async_trait]
impl StudyLedger for HttpLedger {
    async fn submit_session(&self, draft: &SessionDraft) -> Result<SessionRecord, LedgerError> {
        let response = self
            .authorize(self.client.post(self.endpoint("study-sessions")))
            .json(draft)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, LedgerError> {
        let response = self
            .authorize(self.client.get(self.endpoint("subjects")))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn motivational_phrase(&self, context: &str) -> Result<String, LedgerError> {
        let response = self
            .authorize(self.client.post(self.endpoint("motivational-phrase")))
            .json(&PhraseRequest { context })
            .send()
            .await?;

        let payload: PhraseResponse = Self::check(response).await?.json().await?;
        Ok(payload.phrase)
    }

    async fn refresh_profile(&self) -> Result<Profile, LedgerError> {
        let response = self
            .authorize(self.client.get(self.endpoint("auth/profile")))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}
