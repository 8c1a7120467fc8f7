pub mod mail_service;
pub mod password_service;
