use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, SqlErr, TransactionTrait};
use uuid::Uuid;

use crate::{
    domain::{
        error::{RepositoryError, UniqueField},
        models::user::{NewUser, Role, User, UserId},
        repositories::user_registration_repository::UserRegistrationRepository,
    },
    infrastructure::entity::{coaches, users},
};

#[derive(Clone)]
pub struct PostgresUserRegistrationRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresUserRegistrationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRegistrationRepository for PostgresUserRegistrationRepository {
    async fn register_user(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        // Begin transaction; dropping it without commit rolls back
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let user_id = UserId::new();
        let profile = &new_user.profile;
        let now = Utc::now().fixed_offset();

        // Insert user
        let user_model = users::ActiveModel {
            id: Set(*user_id.as_uuid()),
            email: Set(profile.email.clone()),
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            role: Set(profile.role.as_str().to_string()),
            phone_number: Set(profile.phone_number.clone()),
            username: Set(profile.username.as_str().to_string()),
            password_hash: Set(new_user.password_hash.as_str().to_string()),
            email_verified: Set(false),
            created_at: Set(now),
        };

        users::Entity::insert(user_model)
            .exec(&txn)
            .await
            .map_err(insert_error)?;

        // Insert coach profile
        if profile.role == Role::Coach {
            let coach_model = coaches::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(*user_id.as_uuid()),
                created_at: Set(now),
            };

            coaches::Entity::insert(coach_model)
                .exec(&txn)
                .await
                .map_err(insert_error)?;
        }

        // Commit transaction
        txn.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(User::new(user_id, profile.clone(), false))
    }
}

fn insert_error(err: DbErr) -> RepositoryError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        if let Some(field) = unique_field_from_message(&message) {
            return RepositoryError::Conflict(field);
        }
    }
    RepositoryError::DatabaseError(err.to_string())
}

/// Identify the column from a Postgres message such as
/// `duplicate key value violates unique constraint "users_email_key"`.
fn unique_field_from_message(message: &str) -> Option<UniqueField> {
    let constraint = message.split('"').nth(1).unwrap_or(message);
    if constraint.contains("username") {
        Some(UniqueField::Username)
    } else if constraint.contains("phone_number") {
        Some(UniqueField::PhoneNumber)
    } else if constraint.contains("email") {
        Some(UniqueField::Email)
    } else {
        None
    }
}
