// src/store/memory.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ProgressSink, StoreError};
use crate::models::progress::SessionRecord;

/// Process-local sink. Backs the server when no database is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    documents: Arc<Mutex<HashMap<String, SessionRecord>>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<SessionRecord> {
        self.documents.lock().ok()?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProgressSink for MemoryProgressStore {
    async fn put(&self, key: &str, record: &SessionRecord) -> Result<(), StoreError> {
        let mut guard = self
            .documents
            .lock()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), record.clone());
        Ok(())
    }
}
