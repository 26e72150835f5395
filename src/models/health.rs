use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_settings: Vec<String>,
}

impl HealthCheckResponse {
    /// Degraded when a setting the relay needs is empty. Submissions are still
    /// accepted in that state and forwarded as-is.
    pub fn from_config(config: &Config) -> Self {
        let missing_settings: Vec<String> = [
            ("TELEGRAM_BOT_TOKEN", &config.telegram_bot_token),
            ("TELEGRAM_CHAT_ID", &config.telegram_chat_id),
            ("API_URL", &config.api_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

        let status = if missing_settings.is_empty() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            timestamp: Utc::now(),
            missing_settings,
        }
    }
}
