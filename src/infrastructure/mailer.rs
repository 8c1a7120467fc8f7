use async_trait::async_trait;

use crate::{
    config::MailConfig,
    domain::{error::MailError, models::email::EmailMessage, services::mail_service::Mailer},
    infrastructure::{http_mailer::HttpMailer, log_mailer::LogMailer},
};

/// Mailer selected at startup from configuration
#[derive(Clone)]
pub enum ConfiguredMailer {
    Http(HttpMailer),
    Log(LogMailer),
}

impl ConfiguredMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        match &config.api_url {
            Some(url) => Ok(Self::Http(HttpMailer::new(
                url.clone(),
                config.api_key.clone(),
                config.from.clone(),
            )?)),
            None => {
                tracing::warn!("MAIL_API_URL not set, verification emails will only be logged");
                Ok(Self::Log(LogMailer))
            }
        }
    }
}

#[async_trait]
impl Mailer for ConfiguredMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        match self {
            Self::Http(mailer) => mailer.send(message).await,
            Self::Log(mailer) => mailer.send(message).await,
        }
    }
}
