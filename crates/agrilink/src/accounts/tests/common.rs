use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::accounts::domain::{Registration, UserId, UserRecord, UserRole};
pub(super) use crate::accounts::repository::UserRepository;
use crate::accounts::service::AccountService;
use crate::repository::RepositoryError;

pub(super) fn farmer_registration() -> Registration {
    Registration {
        name: "Hassan Farmer".to_string(),
        email: "farmer@demo.com".to_string(),
        password: "password".to_string(),
        role: UserRole::Farmer,
        avatar: None,
        phone_number: Some("+212601234567".to_string()),
        address: Some("Marrakech".to_string()),
    }
}

pub(super) fn transporter_registration() -> Registration {
    Registration {
        name: "Karim Driver".to_string(),
        email: "transport@demo.com".to_string(),
        password: "password".to_string(),
        role: UserRole::Transporter,
        avatar: None,
        phone_number: Some("+212601234567".to_string()),
        address: None,
    }
}

pub(super) fn build_service() -> (
    AccountService<MemoryUserRepository>,
    Arc<MemoryUserRepository>,
) {
    let repository = Arc::new(MemoryUserRepository::default());
    let service = AccountService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryUserRepository {
    users: Arc<Mutex<HashMap<UserId, UserRecord>>>,
}

impl UserRepository for MemoryUserRepository {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        if guard.contains_key(&record.user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.user.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.values().find(|r| r.user.email == email).cloned())
    }
}
