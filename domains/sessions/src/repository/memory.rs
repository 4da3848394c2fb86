//! In-memory session store
//!
//! Keeps attributes in a shared map so tests can seed records and inspect
//! what the handlers wrote. Clones share the same storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use voxthread_common::RepositoryError;

use super::SessionRepository;
use crate::domain::entities::SessionAttributes;

#[derive(Debug, Default)]
struct MemoryState {
    records: HashMap<String, SessionAttributes>,
    reads: usize,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory session store for tests and local runs
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemorySessionRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .expect("session store lock poisoned: prior test panicked")
    }

    fn lock_for_request(&self) -> Result<MutexGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::Backend(format!("session store lock poisoned: {e}")))
    }

    /// Store attributes directly, bypassing the write counter
    pub fn seed(&self, user_id: &str, attributes: SessionAttributes) {
        self.lock()
            .records
            .insert(user_id.to_string(), attributes);
    }

    /// Attributes currently stored for a user
    pub fn attributes(&self, user_id: &str) -> Option<SessionAttributes> {
        self.lock().records.get(user_id).cloned()
    }

    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Drop all records and counters
    pub fn clear(&self) {
        *self.lock() = MemoryState::default();
    }
}

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn load(&self, user_id: &str) -> Result<Option<SessionAttributes>, RepositoryError> {
        let mut state = self.lock_for_request()?;
        state.reads += 1;
        if state.fail_reads {
            return Err(RepositoryError::Backend(
                "in-memory store read failure".to_string(),
            ));
        }
        Ok(state.records.get(user_id).cloned())
    }

    async fn save(
        &self,
        user_id: &str,
        attributes: &SessionAttributes,
    ) -> Result<(), RepositoryError> {
        let mut state = self.lock_for_request()?;
        state.writes += 1;
        if state.fail_writes {
            return Err(RepositoryError::Backend(
                "in-memory store write failure".to_string(),
            ));
        }
        state
            .records
            .insert(user_id.to_string(), attributes.clone());
        Ok(())
    }
}
