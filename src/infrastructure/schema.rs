use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema,
    sea_query::{Index, IndexCreateStatement},
};

use crate::infrastructure::entity::{coaches, users, verification_codes};

/// Create missing tables and indexes. Existing tables are left untouched.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, coaches::Entity).await?;
    create_table(db, verification_codes::Entity).await?;

    create_index(
        db,
        Index::create()
            .name("idx_users_first_name_last_name")
            .table(users::Entity)
            .col(users::Column::FirstName)
            .col(users::Column::LastName)
            .if_not_exists()
            .to_owned(),
    )
    .await?;
    create_index(
        db,
        Index::create()
            .name("idx_verification_codes_email")
            .table(verification_codes::Entity)
            .col(verification_codes::Column::Email)
            .if_not_exists()
            .to_owned(),
    )
    .await?;

    tracing::info!("database schema ready");
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}

async fn create_index(db: &DatabaseConnection, statement: IndexCreateStatement) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}
