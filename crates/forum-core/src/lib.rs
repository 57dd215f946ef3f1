//! # Forum Core
//!
//! The domain layer of the forum service.
//! Users, posts and comments as plain records, the error taxonomy shared by every
//! layer, and the repository ports that storage adapters implement.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
