use async_trait::async_trait;

use crate::domain::{error::MailError, models::email::EmailMessage};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}
