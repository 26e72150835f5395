pub mod telegram;

use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::models::telegram::NotificationMessage;

/// Outbound side of the relay. The HTTP handlers only see this trait, so tests
/// can swap the Bot API for an in-memory fake.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_notification(&self, message: &NotificationMessage) -> Result<(), Error>;
}
