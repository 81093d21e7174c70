use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Connection settings for the study ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSettings {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".into(),
            bearer_token: None,
            timeout_secs: 30,
        }
    }
}

/// JSON-backed settings store. Missing or unreadable files fall back to
/// defaults; writes persist immediately.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<LedgerSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            LedgerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn ledger(&self) -> LedgerSettings {
        self.data.read().unwrap().clone()
    }

    /// Stores the bearer credential on login (`Some`) or clears it on logout
    /// (`None`).
    pub fn update_bearer_token(&self, token: Option<String>) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.bearer_token = token;
        }
        self.persist()
    }

    pub fn update_base_url(&self, base_url: String) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.base_url = base_url;
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let data = self.data.read().unwrap().clone();
        let contents =
            serde_json::to_string_pretty(&data).context("Failed to serialize settings")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
