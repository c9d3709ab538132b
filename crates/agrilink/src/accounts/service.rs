use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::repository::RepositoryError;

use super::domain::{Credentials, Registration, User, UserId, UserRecord};
use super::repository::UserRepository;

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("usr-{id:06}"))
}

/// Registration and login over an injected user repository.
///
/// Passwords are stored and compared in plaintext; this service models
/// the marketplace's login simulation, not a hardened credential store.
pub struct AccountService<R> {
    repository: Arc<R>,
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new account. Emails are unique across the registry.
    pub fn register(&self, registration: Registration) -> Result<User, AccountServiceError> {
        if self
            .repository
            .fetch_by_email(&registration.email)?
            .is_some()
        {
            return Err(AccountServiceError::EmailTaken);
        }

        let record = UserRecord {
            user: User {
                id: next_user_id(),
                name: registration.name,
                email: registration.email,
                role: registration.role,
                avatar: registration.avatar,
                phone_number: registration.phone_number,
                address: registration.address,
                created_at: Utc::now(),
            },
            password: registration.password,
        };

        let stored = self.repository.insert(record)?;
        info!(user = %stored.user.id.0, email = %stored.user.email, "account registered");
        Ok(stored.profile())
    }

    /// Verifies credentials and returns the sanitized profile.
    pub fn login(&self, credentials: &Credentials) -> Result<User, AccountServiceError> {
        let record = self
            .repository
            .fetch_by_email(&credentials.email)?
            .ok_or(AccountServiceError::InvalidCredentials)?;

        if record.password != credentials.password {
            return Err(AccountServiceError::InvalidCredentials);
        }

        info!(user = %record.user.id.0, "login succeeded");
        Ok(record.profile())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("Email already in use")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
