use chrono::Duration;

use crate::domain::{
    error::{DomainError, RepositoryError, UniqueField},
    models::{
        email::EmailMessage,
        password::HashedPassword,
        registration::RegistrationInput,
        user::{NewUser, Role, User, UserProfile, Username},
        verification::VerificationCode,
    },
    repositories::{
        user_registration_repository::UserRegistrationRepository,
        user_repository::UserRepository,
        verification_code_repository::VerificationCodeRepository,
    },
    services::{mail_service::Mailer, password_service::PasswordHasher},
};

/// Inserts attempted before giving up on finding a free username
pub const MAX_USERNAME_ATTEMPTS: u64 = 5;

#[derive(Debug, Clone)]
pub struct RegistrationSettings {
    pub verification_code_ttl: Duration,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            verification_code_ttl: Duration::minutes(15),
        }
    }
}

pub struct RegisterUserUsecase<
    U: UserRepository,
    R: UserRegistrationRepository,
    V: VerificationCodeRepository,
    P: PasswordHasher,
    M: Mailer,
> {
    user_repository: U,
    registration_repository: R,
    verification_code_repository: V,
    password_hasher: P,
    mailer: M,
    settings: RegistrationSettings,
}

impl<U, R, V, P, M> RegisterUserUsecase<U, R, V, P, M>
where
    U: UserRepository,
    R: UserRegistrationRepository,
    V: VerificationCodeRepository,
    P: PasswordHasher + Send + Sync + 'static,
    M: Mailer,
{
    pub fn new(
        user_repository: U,
        registration_repository: R,
        verification_code_repository: V,
        password_hasher: P,
        mailer: M,
        settings: RegistrationSettings,
    ) -> Self {
        Self {
            user_repository,
            registration_repository,
            verification_code_repository,
            password_hasher,
            mailer,
            settings,
        }
    }

    /// Create an unverified account and mail its verification code.
    ///
    /// When delivery fails the account stays persisted with `email_verified = false`
    /// and [`DomainError::EmailDelivery`] is returned.
    pub async fn register(&self, input: RegistrationInput) -> Result<User, DomainError> {
        if let Some(existing) = self.user_repository.find_by_email(&input.email).await? {
            if existing.role() == Role::Deleted {
                tracing::info!(user_id = %existing.id(), "registration attempt with banned email");
                return Err(DomainError::EmailBanned);
            }
            return Err(DomainError::EmailAlreadyExists);
        }

        // deleted accounts still hold their phone number
        if self
            .user_repository
            .find_by_phone_number(&input.phone_number)
            .await?
            .is_some()
        {
            return Err(DomainError::PhoneNumberAlreadyExists);
        }

        let RegistrationInput {
            email,
            first_name,
            last_name,
            password,
            role,
            phone_number,
        } = input;

        let password_hash = self.hash_password(password).await?;

        let namesakes = self
            .user_repository
            .count_by_name(&first_name, &last_name)
            .await?;

        let new_user = NewUser {
            profile: UserProfile {
                username: Username::derive(&first_name, &last_name, namesakes),
                email,
                first_name,
                last_name,
                role,
                phone_number,
            },
            password_hash,
        };
        let user = self.insert_with_free_username(new_user, namesakes).await?;
        tracing::info!(
            user_id = %user.id(),
            username = user.username().as_str(),
            role = %user.role(),
            "user registered"
        );

        let code = VerificationCode::generate(user.email(), self.settings.verification_code_ttl)?;
        self.verification_code_repository.save(&code).await?;

        let message = EmailMessage::verification(user.email(), code.code(), &user.full_name());
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(user_id = %user.id(), error = %e, "verification email not delivered");
            return Err(DomainError::EmailDelivery(e));
        }

        Ok(user)
    }

    async fn hash_password(&self, password: String) -> Result<HashedPassword, DomainError> {
        let hasher = self.password_hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::PasswordHash(e.to_string()))?
    }

    /// The store owns uniqueness; a username conflict moves on to the next suffix.
    async fn insert_with_free_username(
        &self,
        mut new_user: NewUser,
        namesakes: u64,
    ) -> Result<User, DomainError> {
        for attempt in 0..MAX_USERNAME_ATTEMPTS {
            if attempt > 0 {
                new_user.profile.username = Username::derive(
                    &new_user.profile.first_name,
                    &new_user.profile.last_name,
                    namesakes + attempt,
                );
            }
            match self.registration_repository.register_user(&new_user).await {
                Ok(user) => return Ok(user),
                Err(RepositoryError::Conflict(UniqueField::Username)) => {
                    tracing::debug!(
                        username = new_user.profile.username.as_str(),
                        "username taken, retrying"
                    );
                }
                Err(RepositoryError::Conflict(UniqueField::Email)) => {
                    return Err(DomainError::EmailAlreadyExists);
                }
                Err(RepositoryError::Conflict(UniqueField::PhoneNumber)) => {
                    return Err(DomainError::PhoneNumberAlreadyExists);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(DomainError::UsernameUnavailable(MAX_USERNAME_ATTEMPTS))
    }
}
