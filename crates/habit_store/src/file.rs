use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::debug;

use habit_core::{CompletionLedger, Habit, LedgerPatch};

use crate::store::{DocumentStore, StoreError};

/// JSON-file document store: one directory per user holding `registry.json`
/// (the habit list) and `marks.json` (the completion ledger).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn registry_path(&self, uid: &str) -> PathBuf {
        self.root.join(uid).join("registry.json")
    }

    fn ledger_path(&self, uid: &str) -> PathBuf {
        self.root.join(uid).join("marks.json")
    }

    async fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no record on disk");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write_record<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_vec_pretty(value)?;
        fs::write(path, payload).await?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    async fn load_registry(&self, uid: &str) -> Result<Option<Vec<Habit>>, StoreError> {
        Self::read_record(&self.registry_path(uid)).await
    }

    async fn save_registry(&self, uid: &str, habits: &[Habit]) -> Result<(), StoreError> {
        Self::write_record(&self.registry_path(uid), &habits).await
    }

    async fn load_ledger(&self, uid: &str) -> Result<Option<CompletionLedger>, StoreError> {
        Self::read_record(&self.ledger_path(uid)).await
    }

    async fn merge_ledger(&self, uid: &str, patch: &LedgerPatch) -> Result<(), StoreError> {
        let path = self.ledger_path(uid);
        let mut ledger = Self::read_record::<CompletionLedger>(&path)
            .await?
            .unwrap_or_default();
        ledger.apply(patch);
        Self::write_record(&path, &ledger).await
    }
}
