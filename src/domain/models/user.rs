use std::{fmt, str::FromStr};

use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, models::password::HashedPassword};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(Uuid);
impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role. `Deleted` marks banned or removed accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Coach,
    Deleted,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Coach => "COACH",
            Self::Deleted => "DELETED",
        }
    }

    /// Roles a visitor may pick when signing up
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Self::User | Self::Coach)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "COACH" => Ok(Self::Coach),
            "DELETED" => Ok(Self::Deleted),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);
impl Username {
    /// Builds `first.last`, suffixed with `n` when `n > 0`, without any whitespace and lowercased.
    pub fn derive(first_name: &str, last_name: &str, n: u64) -> Self {
        let raw = if n > 0 {
            format!("{first_name}.{last_name}{n}")
        } else {
            format!("{first_name}.{last_name}")
        };
        let value = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        Self(value)
    }

    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone_number: String,
    pub username: Username,
}

/// A user about to be persisted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub profile: UserProfile,
    pub password_hash: HashedPassword,
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    profile: UserProfile,
    email_verified: bool,
}

impl User {
    pub fn new(id: UserId, profile: UserProfile, email_verified: bool) -> Self {
        Self {
            id,
            profile,
            email_verified,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }
    pub fn email(&self) -> &str {
        &self.profile.email
    }
    pub fn role(&self) -> Role {
        self.profile.role
    }
    pub fn username(&self) -> &Username {
        &self.profile.username
    }
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
    pub fn email_verified(&self) -> bool {
        self.email_verified
    }
    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_without_namesakes_has_no_suffix() {
        assert_eq!(Username::derive("Ana", "Gomez", 0).as_str(), "ana.gomez");
    }

    #[test]
    fn username_with_namesakes_gets_count_suffix() {
        assert_eq!(Username::derive("Ana", "Gomez", 1).as_str(), "ana.gomez1");
        assert_eq!(Username::derive("Ana", "Gomez", 12).as_str(), "ana.gomez12");
    }

    #[test]
    fn username_strips_all_whitespace() {
        let username = Username::derive("Mary Ann", "De La\tCruz", 0);
        assert_eq!(username.as_str(), "maryann.delacruz");
    }

    #[test]
    fn role_round_trips_through_wire_names() {
        for role in [Role::User, Role::Coach, Role::Deleted] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("coach".parse::<Role>().is_err());
    }

    #[test]
    fn default_user_ids_are_distinct() {
        assert_ne!(UserId::default(), UserId::default());
    }

    #[test]
    fn deleted_role_cannot_be_self_assigned() {
        assert!(Role::User.is_self_assignable());
        assert!(Role::Coach.is_self_assignable());
        assert!(!Role::Deleted.is_self_assignable());
    }
}
