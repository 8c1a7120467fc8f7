pub mod coaches;
pub mod users;
pub mod verification_codes;
