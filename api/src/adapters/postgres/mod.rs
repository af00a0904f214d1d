//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod user_repo;


pub use user_repo::PostgresUserRepository;
