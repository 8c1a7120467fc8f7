use std::fmt;

use crate::domain::models::user::Role;

/// Sign-up data that already passed request validation
pub struct RegistrationInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
    pub phone_number: String,
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_contains_password() {
        let input = RegistrationInput {
            email: "a@b.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            password: "Secret123!".to_string(),
            role: Role::User,
            phone_number: "+15551234567".to_string(),
        };
        let rendered = format!("{input:?}");
        assert!(!rendered.contains("Secret123!"));
        assert!(rendered.contains("<redacted>"));
    }
}
