use serde::{Deserialize, Serialize};

use crate::config::TelegramConfig;
use crate::error::RelayError;

/// Telegram rejects messages longer than this many characters
const MAX_MESSAGE_LEN: usize = 4096;

/// Sends formatted summaries to one chat through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(api_base: &str, bot_token: &str, chat_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// `None` unless both the bot token and the chat id are configured.
    pub fn from_config(config: &TelegramConfig) -> Option<Self> {
        let (token, chat_id) = config.credentials()?;
        Some(Self::new(&config.api_base, token, chat_id))
    }

    /// Posts `text` with legacy Markdown parsing. Callers are expected to have
    /// escaped any untrusted values already.
    pub async fn send_markdown(&self, text: &str) -> Result<(), RelayError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let text = truncate_message(text);
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: &text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };

        // reqwest errors carry the request URL, which includes the bot token
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Delivery(e.without_url().to_string()))?;

        let status = response.status();
        let body: Option<TelegramResponse> = response.json().await.ok();

        match body {
            Some(body) if status.is_success() && body.ok => Ok(()),
            Some(body) => Err(RelayError::Delivery(
                body.description
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            )),
            None => Err(RelayError::Delivery(format!(
                "HTTP {} with unreadable body",
                status.as_u16()
            ))),
        }
    }
}

/// Cuts `text` to the Telegram limit at a char boundary, marking the cut with `…`.
pub fn truncate_message(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_LEN {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(MAX_MESSAGE_LEN - 1).collect();
    // a dangling escape would make the Markdown unparseable
    if truncated.ends_with('\\') {
        truncated.pop();
    }
    truncated.push('…');
    truncated
}
