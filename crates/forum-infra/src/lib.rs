//! # Forum Infrastructure
//!
//! Concrete implementations of the ports defined in `forum-core`:
//! SeaORM entities for `users`, `posts` and `comments`, repositories bound to a
//! per-request [`UnitOfWork`], connection pooling and schema bootstrap.

pub mod database;

pub use database::{DatabaseConfig, DbConn, UnitOfWork, connect, ensure_schema};
