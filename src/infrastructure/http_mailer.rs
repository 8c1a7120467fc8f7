use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    error::MailError, models::email::EmailMessage, services::mail_service::Mailer,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers mail through a transactional-mail HTTP API (JSON body, bearer key).
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl HttpMailer {
    pub fn new(endpoint: String, api_key: Option<String>, from: String) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            from,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let payload = OutgoingEmail {
            from: &self.from,
            to: [message.to()],
            subject: message.subject(),
            html: message.html(),
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(status.as_u16()));
        }
        tracing::debug!(subject = message.subject(), "email accepted by provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_provider_shape() {
        let message = EmailMessage::verification("a@b.com", "123456", "Ana Gomez");
        let payload = OutgoingEmail {
            from: "no-reply@example.com",
            to: [message.to()],
            subject: message.subject(),
            html: message.html(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["from"], "no-reply@example.com");
        assert_eq!(json["to"], serde_json::json!(["a@b.com"]));
        assert_eq!(json["subject"], "Email verification");
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        let mailer = HttpMailer::new("http://127.0.0.1:9/send".to_string(), None, "x@y.z".to_string())
            .unwrap();
        let message = EmailMessage::verification("a@b.com", "123456", "Ana Gomez");
        let result = mailer.send(&message).await;
        assert!(matches!(result, Err(MailError::Transport(_))));
    }
}
