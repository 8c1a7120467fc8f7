use std::sync::Arc;

use axum::{Json, Router, body::Bytes, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    domain::{
        models::{registration::RegistrationInput, user::Role},
        repositories::{
            user_registration_repository::UserRegistrationRepository,
            user_repository::UserRepository,
            verification_code_repository::VerificationCodeRepository,
        },
        services::{mail_service::Mailer, password_service::PasswordHasher},
    },
    presentation::{
        error::ApiError,
        validation::{
            FieldError, field_errors, validate_password_strength, validate_phone_number,
            validate_role,
        },
    },
    usecase::register_user_usecase::RegisterUserUsecase,
};

// Request

/// json for register request
#[derive(Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be 8 to 128 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
    #[validate(custom(function = "validate_role"))]
    pub role: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

impl RegisterRequest {
    /// Trim all identity fields and lowercase the email. The password is kept verbatim.
    fn normalize(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.role = self.role.trim().to_string();
        self.phone_number = self.phone_number.trim().to_string();
        self
    }

    /// Parse a raw body into validated registration input
    pub fn parse(body: &[u8]) -> Result<RegistrationInput, Vec<FieldError>> {
        let request = serde_json::from_slice::<RegisterRequest>(body)
            .map_err(|e| vec![FieldError::malformed_body(&e)])?
            .normalize();
        request.validate().map_err(|e| field_errors(&e))?;

        let role = request
            .role
            .parse::<Role>()
            .map_err(|e| vec![FieldError::new("role", "invalid_role", e.to_string())])?;

        Ok(RegistrationInput {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            role,
            phone_number: request.phone_number,
        })
    }
}

// Response

/// json for register response
#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: String,
}

pub const VERIFICATION_EMAIL_SENT: &str = "Verification email sent.";

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router
pub fn create_registration_router<U, R, V, P, M>(
    register_service: RegisterUserUsecase<U, R, V, P, M>,
) -> Router
where
    U: UserRepository + 'static,
    R: UserRegistrationRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PasswordHasher + Send + Sync + 'static,
    M: Mailer + 'static,
{
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/auth/register", post(register::<U, R, V, P, M>))
        .with_state(state)
}

pub struct AppState<
    U: UserRepository,
    R: UserRegistrationRepository,
    V: VerificationCodeRepository,
    P: PasswordHasher,
    M: Mailer,
> {
    pub register_service: Arc<RegisterUserUsecase<U, R, V, P, M>>,
}

impl<U, R, V, P, M> Clone for AppState<U, R, V, P, M>
where
    U: UserRepository,
    R: UserRegistrationRepository,
    V: VerificationCodeRepository,
    P: PasswordHasher,
    M: Mailer,
{
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
        }
    }
}

// handler function

/// handler function for register
async fn register<U, R, V, P, M>(
    State(state): State<AppState<U, R, V, P, M>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError>
where
    U: UserRepository,
    R: UserRegistrationRepository,
    V: VerificationCodeRepository,
    P: PasswordHasher + Send + Sync + 'static,
    M: Mailer,
{
    let input = RegisterRequest::parse(&body).map_err(ApiError::Validation)?;
    state.register_service.register(input).await?;

    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            success: VERIFICATION_EMAIL_SENT.to_string(),
        }),
    ))
}
