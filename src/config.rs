use std::{net::SocketAddr, str::FromStr};

use chrono::Duration;
use thiserror::Error;

use crate::infrastructure::argon2_password_hasher::HashCost;

/// Longest accepted verification code lifetime (one week)
pub const MAX_VERIFICATION_CODE_TTL_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Outgoing mail settings. Without `api_url` mail is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
}

/// Service configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Env var: `DATABASE_MAX_CONNECTIONS` (default 10).
    pub database_max_connections: u32,
    /// Env var: `BIND_ADDR` (default `0.0.0.0:8080`).
    pub bind_addr: SocketAddr,
    pub mail: MailConfig,
    /// Env var: `VERIFICATION_CODE_TTL_MINUTES` (default 15, at most one week).
    pub verification_code_ttl: Duration,
    /// Env vars: `PASSWORD_HASH_MEMORY_KIB`, `PASSWORD_HASH_ITERATIONS`, `PASSWORD_HASH_PARALLELISM`.
    pub password_hash_cost: HashCost,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // a missing .env file is fine, real env vars still apply
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_cost = HashCost::default();
        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            mail: MailConfig {
                api_url: lookup("MAIL_API_URL").filter(|v| !v.is_empty()),
                api_key: lookup("MAIL_API_KEY").filter(|v| !v.is_empty()),
                from: lookup("MAIL_FROM").unwrap_or_else(|| "no-reply@example.com".to_string()),
            },
            verification_code_ttl: verification_code_ttl(&lookup)?,
            password_hash_cost: HashCost {
                memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", default_cost.memory_kib)?,
                iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", default_cost.iterations)?,
                parallelism: parse_or(
                    &lookup,
                    "PASSWORD_HASH_PARALLELISM",
                    default_cost.parallelism,
                )?,
            },
        })
    }
}

fn verification_code_ttl(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Duration, ConfigError> {
    const KEY: &str = "VERIFICATION_CODE_TTL_MINUTES";
    let minutes: i64 = parse_or(lookup, KEY, 15)?;
    if !(1..=MAX_VERIFICATION_CODE_TTL_MINUTES).contains(&minutes) {
        return Err(ConfigError::Invalid {
            key: KEY,
            value: minutes.to_string(),
        });
    }
    Duration::try_minutes(minutes).ok_or(ConfigError::Invalid {
        key: KEY,
        value: minutes.to_string(),
    })
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/app")]).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/app");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.mail.api_url, None);
        assert_eq!(config.mail.from, "no-reply@example.com");
        assert_eq!(config.verification_code_ttl, Duration::minutes(15));
        assert_eq!(config.password_hash_cost, HashCost::default());
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("MAIL_API_URL", "https://mail.example.com/send"),
            ("MAIL_API_KEY", "secret"),
            ("PASSWORD_HASH_ITERATIONS", "4"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.mail.api_url.as_deref(), Some("https://mail.example.com/send"));
        assert_eq!(config.mail.api_key.as_deref(), Some("secret"));
        assert_eq!(config.password_hash_cost.iterations, 4);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let result = load(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("VERIFICATION_CODE_TTL_MINUTES", "soon"),
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "VERIFICATION_CODE_TTL_MINUTES", .. })
        ));
    }

    #[test]
    fn verification_code_ttl_must_be_positive() {
        for ttl in ["0", "-5"] {
            let result = load(&[
                ("DATABASE_URL", "postgres://db/app"),
                ("VERIFICATION_CODE_TTL_MINUTES", ttl),
            ]);
            assert!(
                matches!(
                    result,
                    Err(ConfigError::Invalid { key: "VERIFICATION_CODE_TTL_MINUTES", .. })
                ),
                "ttl {ttl} accepted"
            );
        }
    }

    #[test]
    fn verification_code_ttl_is_capped() {
        let result = load(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("VERIFICATION_CODE_TTL_MINUTES", "1000000000000"),
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "VERIFICATION_CODE_TTL_MINUTES", .. })
        ));

        let config = load(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("VERIFICATION_CODE_TTL_MINUTES", "10080"),
        ])
        .unwrap();
        assert_eq!(config.verification_code_ttl, Duration::weeks(1));
    }
}
