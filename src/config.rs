//! Configuration for the store client and the contact-form notifier.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde, though we log a warning when
//! the file contains potential typos. Credentials can also come from the
//! environment, and the environment takes precedence over the file.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::service::ServiceOptions;

/// Env var names honored by [`Config::overlay_env`].
const ENV_FIRESTORE_PROJECT_ID: &str = "SAIVO_FIRESTORE_PROJECT_ID";
const ENV_FIRESTORE_API_KEY: &str = "SAIVO_FIRESTORE_API_KEY";
const ENV_TELEGRAM_BOT_TOKEN: &str = "SAIVO_TELEGRAM_BOT_TOKEN";
const ENV_TELEGRAM_CHAT_ID: &str = "SAIVO_TELEGRAM_CHAT_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

/// Top-level configuration.
///
/// All sections use `#[serde(default)]` so any subset of keys can be
/// specified. A custom Debug impl masks credentials to prevent secret leakage
/// in logs, error messages, and debug output.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub firestore: FirestoreConfig,
    pub telegram: TelegramConfig,
    pub service: ServiceConfig,
}

/// Firestore connection settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct FirestoreConfig {
    /// Google Cloud project id.
    pub project_id: String,

    /// Collection name holding the articles.
    pub collection: String,

    /// API key appended to every request (also: SAIVO_FIRESTORE_API_KEY).
    pub api_key: Option<String>,

    /// Override for the REST endpoint. Used by tests against a local mock;
    /// leave unset in production.
    pub base_url: Option<String>,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            collection: "news".to_string(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Contact-form notifier settings.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token (also: SAIVO_TELEGRAM_BOT_TOKEN).
    pub bot_token: Option<String>,

    /// Primary recipient chat id; syntactic variants are derived from it
    /// (also: SAIVO_TELEGRAM_CHAT_ID).
    pub chat_id: Option<String>,

    /// Override for the Bot API endpoint. Tests only.
    pub base_url: Option<String>,
}

/// Query-layer behavior knobs; see [`ServiceOptions`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub include_unpublished: bool,
    pub fallback_on_empty: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            include_unpublished: true,
            fallback_on_empty: true,
        }
    }
}

impl From<&ServiceConfig> for ServiceOptions {
    fn from(config: &ServiceConfig) -> Self {
        ServiceOptions {
            include_unpublished: config.include_unpublished,
            fallback_on_empty: config.fallback_on_empty,
        }
    }
}

/// Mask credentials in Debug output to prevent secret leakage.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("firestore", &self.firestore)
            .field("telegram", &self.telegram)
            .field("service", &self.service)
            .finish()
    }
}

impl std::fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("project_id", &self.project_id)
            .field("collection", &self.collection)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[REDACTED]"))
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading so a corrupted or maliciously large
        // file never gets slurped into memory.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to detect likely typos in section names
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["firestore", "telegram", "service"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            project_id = %config.firestore.project_id,
            collection = %config.firestore.collection,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Overlay credentials from the environment. Env vars take precedence
    /// over the config file.
    pub fn overlay_env(mut self) -> Self {
        if let Ok(project_id) = std::env::var(ENV_FIRESTORE_PROJECT_ID) {
            self.firestore.project_id = project_id;
        }
        if let Ok(api_key) = std::env::var(ENV_FIRESTORE_API_KEY) {
            self.firestore.api_key = Some(api_key);
        }
        if let Ok(bot_token) = std::env::var(ENV_TELEGRAM_BOT_TOKEN) {
            self.telegram.bot_token = Some(bot_token);
        }
        if let Ok(chat_id) = std::env::var(ENV_TELEGRAM_CHAT_ID) {
            self.telegram.chat_id = Some(chat_id);
        }
        self
    }
}
