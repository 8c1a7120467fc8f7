use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::{domain::error::DomainError, presentation::validation::FieldError};

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            Self::Domain(
                error @ (DomainError::EmailBanned
                | DomainError::EmailAlreadyExists
                | DomainError::PhoneNumberAlreadyExists),
            ) => (StatusCode::BAD_REQUEST, Json(json!({ "error": error.to_string() })))
                .into_response(),
            Self::Domain(error @ DomainError::EmailDelivery(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error.to_string() })),
            )
                .into_response(),
            Self::Domain(error) => {
                // the raw fault stays in the log, the client only gets the reference
                let reference = Uuid::new_v4();
                tracing::error!(%reference, error = %error, "registration failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": format!("Internal server error. Reference: {reference}")
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::domain::error::{MailError, RepositoryError};

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_errors_are_listed() {
        let (status, body) = render(ApiError::Validation(vec![FieldError::new(
            "email",
            "email",
            "Invalid email address",
        )]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["path"], json!(["email"]));
        assert_eq!(body["errors"][0]["message"], "Invalid email address");
    }

    #[tokio::test]
    async fn conflicts_are_bad_requests() {
        let (status, body) = render(DomainError::PhoneNumberAlreadyExists.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User with this phone number already exists.");
    }

    #[tokio::test]
    async fn delivery_failure_is_a_server_error() {
        let (status, body) = render(DomainError::EmailDelivery(MailError::Rejected(503)).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to send verification email.");
    }

    #[tokio::test]
    async fn unexpected_faults_do_not_leak_details() {
        let fault = DomainError::Repository(RepositoryError::DatabaseError(
            "password authentication failed for user \"app\"".to_string(),
        ));
        let (status, body) = render(fault.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Internal server error. Reference: "));
        assert!(!message.contains("password authentication"));
    }
}
