//! Contact-form forwarder: posts submissions to the Telegram Bot API.
//!
//! User-supplied fields are HTML-escaped and joined with fixed labels into a
//! single `parse_mode: HTML` message. Group chat ids come in several
//! syntactic flavors (with and without the `-100` supergroup prefix), so on
//! failure the same payload is retried against each variant of the configured
//! id until one succeeds or all fail.
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::config::TelegramConfig;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Bot token or chat id missing from configuration.
    #[error("Telegram credentials are not configured")]
    Unconfigured,
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The Bot API rejected the message for every chat id variant.
    #[error("Telegram API error: {0}")]
    Api(String),
}

/// One contact-form submission. `company` and `service` are optional in the
/// form and are omitted from the message when empty.
#[derive(Debug, Clone, Default)]
pub struct ContactMessage {
    pub name: String,
    pub phone: String,
    pub company: String,
    pub service: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
struct BotApiResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends contact-form submissions to a Telegram chat.
pub struct ContactNotifier {
    client: reqwest::Client,
    bot_token: SecretString,
    chat_id: String,
    base_url: String,
}

impl ContactNotifier {
    /// Errors with [`NotifyError::Unconfigured`] when either credential is
    /// missing, so a site deployed without the bot degrades at construction
    /// rather than on first submission.
    pub fn new(client: reqwest::Client, config: &TelegramConfig) -> Result<Self, NotifyError> {
        let bot_token = config.bot_token.clone().ok_or(NotifyError::Unconfigured)?;
        let chat_id = config.chat_id.clone().ok_or(NotifyError::Unconfigured)?;
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client,
            bot_token: SecretString::from(bot_token),
            chat_id,
            base_url,
        })
    }

    /// Forward one submission, trying each chat id variant in order.
    ///
    /// Returns the last error when no variant accepts the message.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        let text = format_message(message);
        let mut last_error = NotifyError::Api("no chat id candidates".to_string());

        for candidate in chat_id_candidates(&self.chat_id) {
            match self.send_to(&candidate, &text).await {
                Ok(()) => {
                    tracing::info!(chat_id = %candidate, "Forwarded contact form submission");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(chat_id = %candidate, error = %e, "Telegram send failed, trying next chat id variant");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    async fn send_to(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.base_url,
            self.bot_token.expose_secret()
        );
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });
        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        let api: BotApiResponse = response.json().await.unwrap_or_default();
        if !status.is_success() || !api.ok {
            return Err(NotifyError::Api(
                api.description
                    .unwrap_or_else(|| format!("status {}", status.as_u16())),
            ));
        }
        Ok(())
    }
}

/// Escape the characters significant to Telegram's HTML parse mode.
/// `&` goes first so the entities themselves survive.
pub(crate) fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn format_message(message: &ContactMessage) -> String {
    let mut lines = vec![
        "<b>New Contact Form Submission</b>".to_string(),
        format!("👤 <b>Name:</b> {}", escape_html(&message.name)),
        format!("📞 <b>Phone:</b> {}", escape_html(&message.phone)),
    ];
    if !message.company.is_empty() {
        lines.push(format!("🏢 <b>Company:</b> {}", escape_html(&message.company)));
    }
    if !message.service.is_empty() {
        lines.push(format!("🧩 <b>Service:</b> {}", escape_html(&message.service)));
    }
    lines.push(String::new());
    lines.push(format!(
        "<b>Message:</b>\n{}",
        escape_html(&message.description)
    ));
    lines.join("\n")
}

/// Syntactic variants of a group chat id, in the order they are tried:
/// as configured, with the `-100` supergroup prefix, with a plain `-` prefix.
/// Duplicates collapse while preserving order.
pub(crate) fn chat_id_candidates(raw: &str) -> Vec<String> {
    let stripped = raw
        .strip_prefix("-100")
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);

    let mut candidates = Vec::new();
    for candidate in [
        raw.to_string(),
        format!("-100{stripped}"),
        format!("-{stripped}"),
    ] {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}
