use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("This email is banned from the platform.")]
    EmailBanned,

    #[error("User with this email already exists.")]
    EmailAlreadyExists,

    #[error("User with this phone number already exists.")]
    PhoneNumberAlreadyExists,

    #[error("Could not allocate a unique username after {0} attempts")]
    UsernameUnavailable(u64),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Verification code generation failed: {0}")]
    VerificationCode(String),

    #[error("Failed to send verification email.")]
    EmailDelivery(#[from] MailError),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unique constraint violated on {0}")]
    Conflict(UniqueField),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Column guarded by a store-enforced unique constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    PhoneNumber,
    Username,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::PhoneNumber => f.write_str("phone_number"),
            Self::Username => f.write_str("username"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Mail provider rejected message with status {0}")]
    Rejected(u16),
}
