use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, TryRngCore};
use sea_orm::prelude::Uuid;

use crate::domain::error::DomainError;

pub const VERIFICATION_CODE_DIGITS: usize = 6;
const CODE_SPACE: u32 = 1_000_000;

/// One-time code mailed to a new user to confirm ownership of the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    id: Uuid,
    email: String,
    code: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn generate(email: &str, ttl: Duration) -> Result<Self, DomainError> {
        let code = random_code()?;
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            DomainError::VerificationCode(format!("ttl of {ttl} overflows the expiry time"))
        })?;
        Ok(Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            code,
            created_at: now,
            expires_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

fn random_code() -> Result<String, DomainError> {
    // rejection sampling keeps every code equally likely
    let limit = u32::MAX - (u32::MAX % CODE_SPACE);
    loop {
        let n = OsRng
            .try_next_u32()
            .map_err(|e| DomainError::VerificationCode(e.to_string()))?;
        if n < limit {
            return Ok(format!(
                "{:0width$}",
                n % CODE_SPACE,
                width = VERIFICATION_CODE_DIGITS
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_code_is_six_digits() {
        let code = VerificationCode::generate("a@b.com", Duration::minutes(15)).unwrap();
        assert_eq!(code.code().len(), VERIFICATION_CODE_DIGITS);
        assert!(code.code().chars().all(|c| c.is_ascii_digit()));
        assert_eq!(code.email(), "a@b.com");
    }

    #[test]
    fn expiry_follows_ttl() {
        let code = VerificationCode::generate("a@b.com", Duration::minutes(15)).unwrap();
        assert_eq!(code.expires_at() - code.created_at(), Duration::minutes(15));
    }

    #[test]
    fn overflowing_ttl_is_an_error() {
        let result = VerificationCode::generate("a@b.com", Duration::MAX);
        assert!(matches!(result, Err(DomainError::VerificationCode(_))));
    }
}
