use crate::repository::RepositoryError;

use super::domain::{UserId, UserRecord};

/// Storage abstraction for the account registry.
pub trait UserRepository: Send + Sync {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError>;
    fn fetch_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;
}
