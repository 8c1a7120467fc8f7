use async_trait::async_trait;

use crate::domain::{
    error::MailError, models::email::EmailMessage, services::mail_service::Mailer,
};

/// Development mailer: records the send in the log and reports success.
#[derive(Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = message.to(),
            subject = message.subject(),
            "mail delivery disabled, message dropped"
        );
        Ok(())
    }
}
