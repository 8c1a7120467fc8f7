use async_trait::async_trait;

use crate::domain::{error::RepositoryError, models::user::User};

/// Read side of the user store used for uniqueness and naming checks
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_phone_number(&self, phone_number: &str)
    -> Result<Option<User>, RepositoryError>;
    /// Number of users whose first and last name match exactly (case-sensitive)
    async fn count_by_name(&self, first_name: &str, last_name: &str)
    -> Result<u64, RepositoryError>;
}
