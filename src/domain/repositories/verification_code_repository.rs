use async_trait::async_trait;

use crate::domain::{error::RepositoryError, models::verification::VerificationCode};

#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Store the code, replacing any earlier code issued for the same email
    async fn save(&self, code: &VerificationCode) -> Result<(), RepositoryError>;
}
