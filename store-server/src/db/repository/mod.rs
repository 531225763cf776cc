//! Repository Module
//!
//! CRUD and aggregate queries against the local SQLite cache. One repository
//! per table family; each holds a cheap clone of the pool.

// Catalog
pub mod product;

// Customers
pub mod cart;
pub mod customer;

// Ledgers
pub mod order;
pub mod pos_order;

// Back office
pub mod admin;
pub mod promotion;

// Re-exports
pub use admin::AdminRepository;
pub use cart::CartRepository;
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use pos_order::PosOrderRepository;
pub use product::ProductRepository;
pub use promotion::PromotionRepository;

use sqlx::SqlitePool;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with pool reference
#[derive(Clone)]
pub struct BaseRepository {
    pool: SqlitePool,
}

impl BaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
