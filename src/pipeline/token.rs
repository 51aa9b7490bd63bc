//! Generation counter used to supersede in-flight runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, monotonically increasing request generation.
///
/// Every new request advances the counter; a run holding an older
/// [`RunToken`] sees itself superseded on its next check.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every token handed out before.
    pub fn advance(&self) -> RunToken {
        let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        RunToken {
            id,
            counter: Arc::clone(&self.counter),
        }
    }

    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

/// Ticket for one request.
#[derive(Debug, Clone)]
pub struct RunToken {
    id: u64,
    counter: Arc<AtomicU64>,
}

impl RunToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True once a newer request has been started.
    pub fn is_superseded(&self) -> bool {
        self.counter.load(Ordering::SeqCst) != self.id
    }
}
