use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, User},
};

/// Repository for user registration that handles both user and coach profile creation atomically
#[async_trait]
pub trait UserRegistrationRepository: Send + Sync {
    /// Insert the user, plus a coach profile for coaches, in a single transaction.
    ///
    /// Violated unique constraints are reported as [`RepositoryError::Conflict`].
    async fn register_user(&self, new_user: &NewUser) -> Result<User, RepositoryError>;
}
