use habit_core::{CompletionLedger, Habit, LedgerPatch};
use thiserror::Error;

/// A load or save against the external store failed. Absent records are not
/// errors; they come back as `Ok(None)`. Failed saves are surfaced as-is
/// with no automatic retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Keyed access to the two per-user records the engine owns: the habit
/// registry and the completion ledger. The engine treats both as opaque
/// blobs whose shape it fully controls; loose records are coerced into the
/// typed shapes at this boundary.
pub trait DocumentStore: Send + Sync {
    fn load_registry(
        &self,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<Habit>>, StoreError>> + Send;

    /// Full-document overwrite of the registry.
    fn save_registry(
        &self,
        uid: &str,
        habits: &[Habit],
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    fn load_ledger(
        &self,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<Option<CompletionLedger>, StoreError>> + Send;

    /// Merge write: only the habits/dates present in `patch` may be
    /// overwritten, every other mark stays untouched.
    fn merge_ledger(
        &self,
        uid: &str,
        patch: &LedgerPatch,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
