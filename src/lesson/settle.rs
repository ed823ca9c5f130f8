// src/lesson/settle.rs

use std::sync::Arc;

use tokio::sync::OnceCell;

/// A one-shot value produced by an independent background task.
///
/// Clones share the same slot. The first `settle` wins; later values are dropped.
/// Readers never wait: `peek` returns whatever has settled at that instant.
#[derive(Debug)]
pub struct Settled<T> {
    cell: Arc<OnceCell<T>>,
}

impl<T> Clone for Settled<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Default for Settled<T> {
    fn default() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
        }
    }
}

impl<T: Clone> Settled<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call filled the slot.
    pub fn settle(&self, value: T) -> bool {
        self.cell.set(value).is_ok()
    }

    pub fn peek(&self) -> Option<T> {
        self.cell.get().cloned()
    }
}
