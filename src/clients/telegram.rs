use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::{clients::Notifier, config::Config, models::telegram::NotificationMessage};

pub struct TelegramClient {
    http_client: Client,
    send_message_url: String,
}

impl TelegramClient {
    pub fn new(config: &Config) -> Self {
        info!(api_url = %config.api_url, "Telegram client initialized");

        Self {
            http_client: Client::new(),
            send_message_url: config.send_message_url(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send_notification(&self, message: &NotificationMessage) -> Result<(), Error> {
        debug!(chat_id = %message.chat_id, "Sending Telegram message");

        let response = self
            .http_client
            .post(&self.send_message_url)
            .json(message)
            .send()
            .await
            .map_err(|e| anyhow!("Telegram request failed: {}", e.without_url()))?;

        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Telegram API returned status {}: {}",
                status,
                error_text
            ));
        }

        info!(chat_id = %message.chat_id, "Telegram message sent successfully");
        Ok(())
    }
}
