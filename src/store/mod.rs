// src/store/mod.rs

//! Where finished attempts are written: one document per identity in the
//! `progress` collection.

use std::fmt;

use async_trait::async_trait;

use crate::models::progress::SessionRecord;

pub mod memory;
pub mod postgres;

pub use memory::MemoryProgressStore;
pub use postgres::PgProgressStore;

pub const PROGRESS_COLLECTION: &str = "progress";

/// Errors surfaced by progress sinks.
#[derive(Debug)]
pub enum StoreError {
    Connection(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(msg) => write!(f, "connection error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Connection(err.to_string())
    }
}

/// Key-value document sink. `put` overwrites any document under the same key.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn put(&self, key: &str, record: &SessionRecord) -> Result<(), StoreError>;
}
