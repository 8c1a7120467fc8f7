use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};

use crate::{
    domain::{
        error::RepositoryError, models::verification::VerificationCode,
        repositories::verification_code_repository::VerificationCodeRepository,
    },
    infrastructure::entity::verification_codes,
};

#[derive(Clone)]
pub struct PostgresVerificationCodeRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresVerificationCodeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VerificationCodeRepository for PostgresVerificationCodeRepository {
    async fn save(&self, code: &VerificationCode) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        verification_codes::Entity::delete_many()
            .filter(verification_codes::Column::Email.eq(code.email()))
            .exec(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let model = verification_codes::ActiveModel {
            id: Set(code.id()),
            email: Set(code.email().to_string()),
            code: Set(code.code().to_string()),
            expires_at: Set(code.expires_at().fixed_offset()),
            created_at: Set(code.created_at().fixed_offset()),
        };
        verification_codes::Entity::insert(model)
            .exec(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[tokio::test]
    async fn save_replaces_previous_code_in_one_transaction() {
        let code = VerificationCode::generate("a@b.com", Duration::minutes(15)).unwrap();
        let row = verification_codes::Model {
            id: code.id(),
            email: code.email().to_string(),
            code: code.code().to_string(),
            expires_at: code.expires_at().fixed_offset(),
            created_at: code.created_at().fixed_offset(),
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 2,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .append_query_results([vec![row]])
                .into_connection(),
        );
        let repository = PostgresVerificationCodeRepository::new(Arc::clone(&db));

        repository.save(&code).await.unwrap();

        drop(repository);
        let log = Arc::try_unwrap(db)
            .ok()
            .expect("repository released the connection")
            .into_transaction_log();
        assert_eq!(log.len(), 1, "expected a single transaction: {log:?}");
        let statements = format!("{:?}", log[0]);
        let delete_at = statements.find("DELETE FROM").expect("delete statement");
        let insert_at = statements.find("INSERT INTO").expect("insert statement");
        assert!(delete_at < insert_at);
        assert!(statements.contains("verification_codes"));
    }
}
