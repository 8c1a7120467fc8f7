use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    domain::{
        error::RepositoryError,
        models::user::{Role, User, UserId, UserProfile, Username},
        repositories::user_repository::UserRepository,
    },
    infrastructure::entity::users,
};

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_one(
        &self,
        column: users::Column,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        users::Entity::find()
            .filter(column.eq(value))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }
}

impl TryFrom<users::Model> for User {
    type Error = RepositoryError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        let profile = UserProfile {
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role,
            phone_number: model.phone_number,
            username: Username::from_stored(model.username),
        };
        Ok(User::new(UserId::from_uuid(model.id), profile, model.email_verified))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one(users::Column::Email, email).await
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.find_one(users::Column::PhoneNumber, phone_number).await
    }

    async fn count_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<u64, RepositoryError> {
        users::Entity::find()
            .filter(users::Column::FirstName.eq(first_name))
            .filter(users::Column::LastName.eq(last_name))
            .count(self.db.as_ref())
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}
