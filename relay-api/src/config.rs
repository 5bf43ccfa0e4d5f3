use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use shared_types::TransactionField;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RelayConfig {
    pub server: Option<ServerConfig>,
    pub telegram: Option<TelegramConfig>,
    pub inbound: Option<InboundConfig>,
    pub labels: Option<LabelsConfig>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig::default()),
            telegram: None,
            inbound: None,
            labels: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl TelegramConfig {
    /// Token and chat id, when both are set to something non-blank
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.bot_token.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let chat_id = self.chat_id.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
        Some((token, chat_id))
    }
}

fn default_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct InboundConfig {
    /// Shared secret expected in the `X-Relay-Token` header
    pub token: Option<String>,
}

/// Extra label phrasings appended to the built-in transaction label table
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LabelsConfig {
    #[serde(default)]
    pub card_suffix: Vec<String>,
    #[serde(default)]
    pub merchant: Vec<String>,
    #[serde(default)]
    pub transaction_date: Vec<String>,
    #[serde(default)]
    pub amount: Vec<String>,
}

impl LabelsConfig {
    pub fn extra_labels(&self) -> HashMap<TransactionField, Vec<String>> {
        [
            (TransactionField::CardSuffix, &self.card_suffix),
            (TransactionField::Merchant, &self.merchant),
            (TransactionField::TransactionDate, &self.transaction_date),
            (TransactionField::Amount, &self.amount),
        ]
        .into_iter()
        .filter(|(_, labels)| !labels.is_empty())
        .map(|(field, labels)| (field, labels.clone()))
        .collect()
    }
}

const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8080
# max_body_bytes = 10485760

[telegram]
# Bot token from @BotFather and the chat that receives summaries.
# Both can also come from RELAY_TELEGRAM__BOT_TOKEN / RELAY_TELEGRAM__CHAT_ID.
# bot_token = "123456:ABC..."
# chat_id = "-1001234567890"
# api_base = "https://api.telegram.org"

[inbound]
# When set, POST /api/inbound requires a matching X-Relay-Token header
# token = "change-me"

[labels]
# Additional label phrasings per transaction field
# merchant = ["Nama Merchant"]
# amount = ["Jumlah"]
"#;

impl RelayConfig {
    /// Loads the config file (writing a commented default first if it is missing)
    /// and overlays `RELAY_*` environment variables, e.g. `RELAY_TELEGRAM__CHAT_ID`.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(
                Environment::with_prefix("RELAY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: RelayConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn inbound_token(&self) -> Option<String> {
        self.inbound
            .as_ref()
            .and_then(|i| i.token.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("txn-relay").join("relay.toml")
    } else {
        PathBuf::from("relay.toml")
    }
}
