use std::collections::HashMap;

use parking_lot::RwLock;

use habit_core::{CompletionLedger, Habit, LedgerPatch};

use crate::store::{DocumentStore, StoreError};

/// In-memory document store for tests and ephemeral sessions. Honors the
/// same merge semantics as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    registries: RwLock<HashMap<String, Vec<Habit>>>,
    ledgers: RwLock<HashMap<String, CompletionLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn load_registry(&self, uid: &str) -> Result<Option<Vec<Habit>>, StoreError> {
        Ok(self.registries.read().get(uid).cloned())
    }

    async fn save_registry(&self, uid: &str, habits: &[Habit]) -> Result<(), StoreError> {
        self.registries
            .write()
            .insert(uid.to_string(), habits.to_vec());
        Ok(())
    }

    async fn load_ledger(&self, uid: &str) -> Result<Option<CompletionLedger>, StoreError> {
        Ok(self.ledgers.read().get(uid).cloned())
    }

    async fn merge_ledger(&self, uid: &str, patch: &LedgerPatch) -> Result<(), StoreError> {
        self.ledgers
            .write()
            .entry(uid.to_string())
            .or_default()
            .apply(patch);
        Ok(())
    }
}
