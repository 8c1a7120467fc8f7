mod config;
mod domain;
mod infrastructure;
mod presentation;
mod telemetry;
mod usecase;

use std::sync::Arc;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig,
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, mailer::ConfiguredMailer, schema,
        user_registration_repository::PostgresUserRegistrationRepository,
        user_repository::PostgresUserRepository,
        verification_code_repository::PostgresVerificationCodeRepository,
    },
    presentation::handlers::registration_handler::create_registration_router,
    usecase::register_user_usecase::{RegisterUserUsecase, RegistrationSettings},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();
    let config = AppConfig::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.database_max_connections)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Arc::new(Database::connect(opt).await?);
    schema::ensure_schema(&db).await?;

    let register_user_usecase = RegisterUserUsecase::new(
        PostgresUserRepository::new(Arc::clone(&db)),
        PostgresUserRegistrationRepository::new(Arc::clone(&db)),
        PostgresVerificationCodeRepository::new(Arc::clone(&db)),
        Argon2PasswordHasher::new(config.password_hash_cost)?,
        ConfiguredMailer::from_config(&config.mail)?,
        RegistrationSettings {
            verification_code_ttl: config.verification_code_ttl,
        },
    );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", create_registration_router(register_user_usecase))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "registration service listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
