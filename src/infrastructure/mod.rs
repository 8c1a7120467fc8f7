pub mod argon2_password_hasher;
pub mod entity;
pub mod http_mailer;
pub mod log_mailer;
pub mod mailer;
pub mod schema;
pub mod user_registration_repository;
pub mod user_repository;
pub mod verification_code_repository;
