use argon2::{
    Algorithm, Argon2, Params, PasswordHash as Argon2Hash, Version,
    password_hash::{PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::domain::{
    error::DomainError,
    models::password::HashedPassword,
    services::password_service::PasswordHasher,
};

/// Argon2id work factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(cost: HashCost) -> Result<Self, DomainError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| DomainError::PasswordHash(e.to_string()))?;
        Ok(Self { params })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| DomainError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }

    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
        let parsed_hash = Argon2Hash::new(hashed_password.as_str())
            .map_err(|e| DomainError::PasswordHash(e.to_string()))?;

        // parameters are read back from the PHC string
        Ok(Argon2::default()
            .verify_password(plain_password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(HashCost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_is_salted_and_verifies() {
        let hasher = cheap_hasher();
        let first = hasher.hash("Secret123!").unwrap();
        let second = hasher.hash("Secret123!").unwrap();

        assert_ne!(first.as_str(), "Secret123!");
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("Secret123!", &first).unwrap());
        assert!(!hasher.verify("Secret123?", &first).unwrap());
    }

    #[test]
    fn cost_is_encoded_in_hash() {
        let hash = cheap_hasher().hash("Secret123!").unwrap();
        assert!(hash.as_str().contains("m=64,t=1,p=1"));
    }

    #[test]
    fn invalid_cost_is_rejected() {
        let result = Argon2PasswordHasher::new(HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(DomainError::PasswordHash(_))));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = cheap_hasher().verify("x", &HashedPassword::new("not-a-hash".into()));
        assert!(result.is_err());
    }
}
