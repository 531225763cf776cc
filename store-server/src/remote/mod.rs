//! Remote Ledger Module
//!
//! The external document store backing the local cache: one collection per
//! record kind, multi-statement atomic transactions, optimistic conflict
//! detection. Reached through the `any` engine so production uses `ws://`
//! while tests run against `mem://`.

pub mod documents;
pub mod mirror;

pub use mirror::RemoteMirror;

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use thiserror::Error;

/// Remote ledger error types
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction conflict, safe to retry with a fresh transaction
    #[error("Ledger conflict: {0}")]
    Conflict(String),

    /// Connectivity or any other remote failure, surfaced and not retried here
    #[error("Remote ledger error: {0}")]
    Remote(String),
}

impl From<surrealdb::Error> for LedgerError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Covers both the engine's read/write conflict errors and the
        // allocator's optimistic-check THROW
        if msg.to_lowercase().contains("conflict") {
            LedgerError::Conflict(msg)
        } else {
            LedgerError::Remote(msg)
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Connection handle to the remote document store
#[derive(Clone)]
pub struct RemoteLedger {
    db: Surreal<Any>,
}

impl RemoteLedger {
    /// Connect, optionally sign in, and select namespace/database
    pub async fn connect(
        url: &str,
        namespace: &str,
        database: &str,
        credentials: Option<(&str, &str)>,
    ) -> LedgerResult<Self> {
        let db = any::connect(url).await?;
        if let Some((username, password)) = credentials {
            db.signin(Root { username, password }).await?;
        }
        db.use_ns(namespace).use_db(database).await?;
        tracing::info!(url, namespace, database, "Remote ledger connected");
        Ok(Self { db })
    }

    /// Embedded in-memory ledger (tests)
    pub async fn in_memory() -> LedgerResult<Self> {
        Self::connect("mem://", "test", "test", None).await
    }

    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }
}
