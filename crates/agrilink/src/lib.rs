//! AgriLink: a logistics marketplace connecting agricultural producers,
//! transport providers, and buyers.
//!
//! The library is organized as three registries (transport, marketplace,
//! accounts), each split into `domain` types, a `repository` storage trait,
//! a `service` holding the business rules, and an axum `router`. Storage is
//! injected through the repository traits so the in-memory backing used by
//! the API binary can be swapped without touching callers.

pub mod accounts;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod repository;
pub mod telemetry;
pub mod transport;
