use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::{Deserialize, Deserializer, de};
use tracing::{debug, warn};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram_bot_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
    #[serde(default)]
    pub api_url: String,

    #[serde(default = "default_port", deserialize_with = "port_or_default")]
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        match dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(_) => warn!(".env file not found, using process environment"),
        }

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }

    /// Builds a config from explicit `(NAME, value)` pairs instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into()));

        envy::from_iter::<_, Self>(vars)
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))
    }

    pub fn send_message_url(&self) -> String {
        format!("{}{}/sendMessage", self.api_url, self.telegram_bot_token)
    }
}

// Keeps the bot token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_bot_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("api_url", &self.api_url)
            .field("port", &self.port)
            .finish()
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// An empty PORT falls back to the default, same as an unset one.
fn port_or_default<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(DEFAULT_PORT);
    }

    raw.parse::<u16>()
        .map_err(|_| de::Error::custom(format!("invalid port '{}'", raw)))
}
