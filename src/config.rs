use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const API_KEY_PREFIX: &str = "sk-";

/// Settings shared between the hotkey path and the settings window. This is
/// the only place the credential lives; everything else reads it from here.
pub type SharedConfig = Arc<Mutex<Config>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        crate::logger::exe_dir().join("config.json")
    }

    /// Missing or unreadable files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str::<Config>(&s).unwrap_or_else(|e| {
                tracing::warn!("config at {} is invalid ({}), using defaults", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }

    /// Env vars win over the file when set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(v) = get("OPENAI_API_KEY") {
            self.openai_api_key = v.trim().to_string();
        }
        if let Some(v) = get("OPENAI_MODEL") {
            self.openai_model = v;
        }
        if let Some(v) = get("OPENAI_API_BASE") {
            self.api_base = v;
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }
}

/// Copy out the current settings. A poisoned lock still holds valid data.
pub fn snapshot(shared: &SharedConfig) -> Config {
    shared.lock().unwrap_or_else(|p| p.into_inner()).clone()
}

pub fn validate_api_key(key: &str) -> Result<&str> {
    let key = key.trim();
    if key.is_empty() || !key.starts_with(API_KEY_PREFIX) {
        bail!("Please enter a valid OpenAI API key (should start with {})", API_KEY_PREFIX);
    }
    Ok(key)
}

/// Validate, install and persist a new key. The in-memory value is updated
/// before the write so a failed save still leaves the key usable this session.
pub fn update_api_key(shared: &SharedConfig, key: &str, path: &Path) -> Result<()> {
    let key = validate_api_key(key)?;
    let snapshot = {
        let mut cfg = shared.lock().unwrap_or_else(|p| p.into_inner());
        cfg.openai_api_key = key.to_string();
        cfg.clone()
    };
    snapshot.save_to(path).context("Failed to save API key")?;
    tracing::info!("API key updated and saved to {}", path.display());
    Ok(())
}
