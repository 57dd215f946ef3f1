//! Database connection management, entities and repositories.

mod connections;
mod schema;
mod sea_base;
mod sea_repo;
mod unit_of_work;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use schema::ensure_schema;
pub use sea_base::SeaBaseRepository;
pub use sea_repo::{SeaCommentRepository, SeaPostRepository, SeaUserRepository};
pub use sea_orm::DbConn;
pub use unit_of_work::UnitOfWork;

#[cfg(test)]
mod tests;
