//! Account registry: registration and login for farmers, transporters,
//! and store owners. Plaintext credential checks only; session handling
//! lives with the caller.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Credentials, Registration, User, UserId, UserRecord, UserRole};
pub use repository::UserRepository;
pub use router::auth_router;
pub use service::{AccountService, AccountServiceError};
