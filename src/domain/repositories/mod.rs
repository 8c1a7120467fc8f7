pub mod user_registration_repository;
pub mod user_repository;
pub mod verification_code_repository;
