use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use habit_core::{
    active_window, add_habit, default_habits, progress, remove_habit, CompletionLedger, Habit,
    HabitProgress, LedgerPatch, NewHabit, ValidationError,
};

use crate::store::{DocumentStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown habit key `{0}`")]
    UnknownHabit(String),
}

/// One habit together with its derived window and completion statistics, as
/// rendered in the tracking table.
#[derive(Debug, Clone, Serialize)]
pub struct HabitSnapshot {
    pub habit: Habit,
    pub window: Vec<NaiveDate>,
    pub progress: HabitProgress,
}

#[derive(Debug, Clone, Default)]
struct UserState {
    habits: Vec<Habit>,
    ledger: CompletionLedger,
}

/// Orchestrates the pure engine against a document store: loads per-user
/// state lazily, seeds a fresh registry with the default habits, applies
/// validated mutations, and persists them. Single-writer per user; the
/// in-memory cache may diverge from the store after a failed save until the
/// next successful one.
pub struct HabitService<S> {
    store: S,
    seed: Vec<Habit>,
    sessions: RwLock<HashMap<String, UserState>>,
}

pub struct HabitServiceBuilder<S> {
    store: S,
    seed: Vec<Habit>,
}

impl<S: DocumentStore> HabitServiceBuilder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            seed: default_habits(),
        }
    }

    /// Replaces the habits a fresh registry is seeded with.
    pub fn with_seed_habits(mut self, seed: Vec<Habit>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> HabitService<S> {
        HabitService {
            store: self.store,
            seed: self.seed,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl<S: DocumentStore> HabitService<S> {
    pub fn builder(store: S) -> HabitServiceBuilder<S> {
        HabitServiceBuilder::new(store)
    }

    pub fn new(store: S) -> Self {
        Self::builder(store).build()
    }

    /// Loads the user's registry and ledger, seeding and persisting the
    /// default registry when none exists yet. Returns the resolved list.
    #[instrument(skip(self))]
    pub async fn initialize(&self, uid: &str) -> Result<Vec<Habit>, ServiceError> {
        Ok(self.load_state(uid).await?.habits)
    }

    pub async fn habits(&self, uid: &str) -> Result<Vec<Habit>, ServiceError> {
        Ok(self.load_state(uid).await?.habits)
    }

    /// Validates and appends a habit, persisting the full registry. A
    /// rejected candidate leaves both cache and store untouched.
    #[instrument(skip(self, candidate), fields(label = %candidate.label))]
    pub async fn add_habit(
        &self,
        uid: &str,
        candidate: NewHabit,
    ) -> Result<Vec<Habit>, ServiceError> {
        let state = self.load_state(uid).await?;
        let updated = add_habit(&state.habits, candidate)?;
        self.store.save_registry(uid, &updated).await?;
        self.sessions
            .write()
            .entry(uid.to_string())
            .or_default()
            .habits = updated.clone();
        Ok(updated)
    }

    /// Removes a habit and purges its completion marks through a tombstone
    /// merge. Removing an unknown key is a no-op.
    #[instrument(skip(self))]
    pub async fn remove_habit(&self, uid: &str, key: &str) -> Result<Vec<Habit>, ServiceError> {
        let state = self.load_state(uid).await?;
        let (updated, removed) = remove_habit(&state.habits, key);
        self.store.save_registry(uid, &updated).await?;
        if removed {
            self.store
                .merge_ledger(uid, &LedgerPatch::tombstone(key))
                .await?;
        }
        {
            let mut sessions = self.sessions.write();
            let entry = sessions.entry(uid.to_string()).or_default();
            entry.habits = updated.clone();
            if removed {
                entry.ledger.purge_habit(key);
            }
        }
        Ok(updated)
    }

    /// Sets or clears one day's mark with a single-cell merge write. Dates
    /// outside the habit's active window are accepted and preserved; they
    /// are simply never counted. Rapid toggles on the same cell are
    /// last-write-wins in call order.
    #[instrument(skip(self))]
    pub async fn set_day(
        &self,
        uid: &str,
        habit_key: &str,
        date: NaiveDate,
        done: bool,
    ) -> Result<(), ServiceError> {
        self.load_state(uid).await?;
        self.store
            .merge_ledger(uid, &LedgerPatch::mark(habit_key, date, done))
            .await?;
        self.sessions
            .write()
            .entry(uid.to_string())
            .or_default()
            .ledger
            .set_day(habit_key, date, done);
        Ok(())
    }

    pub async fn is_done(
        &self,
        uid: &str,
        habit_key: &str,
        date: NaiveDate,
    ) -> Result<bool, ServiceError> {
        Ok(self.load_state(uid).await?.ledger.is_done(habit_key, date))
    }

    /// Completion statistics for one habit at the given reference date.
    pub async fn progress(
        &self,
        uid: &str,
        habit_key: &str,
        today: NaiveDate,
    ) -> Result<HabitProgress, ServiceError> {
        let state = self.load_state(uid).await?;
        let habit = state
            .habits
            .iter()
            .find(|habit| habit.key == habit_key)
            .ok_or_else(|| ServiceError::UnknownHabit(habit_key.to_string()))?;
        Ok(progress(habit, &state.ledger, today))
    }

    /// Every habit with its window and statistics, in registry order.
    #[instrument(skip(self))]
    pub async fn snapshot(
        &self,
        uid: &str,
        today: NaiveDate,
    ) -> Result<Vec<HabitSnapshot>, ServiceError> {
        let state = self.load_state(uid).await?;
        Ok(state
            .habits
            .iter()
            .map(|habit| HabitSnapshot {
                window: active_window(habit, today),
                progress: progress(habit, &state.ledger, today),
                habit: habit.clone(),
            })
            .collect())
    }

    async fn load_state(&self, uid: &str) -> Result<UserState, ServiceError> {
        if let Some(state) = self.sessions.read().get(uid) {
            return Ok(state.clone());
        }

        let habits = match self.store.load_registry(uid).await? {
            Some(habits) => habits,
            None => {
                debug!(uid, "no registry on record, seeding defaults");
                let seed = self.seed.clone();
                self.store.save_registry(uid, &seed).await?;
                seed
            }
        };
        let ledger = self.store.load_ledger(uid).await?.unwrap_or_default();

        let state = UserState { habits, ledger };
        self.sessions
            .write()
            .entry(uid.to_string())
            .or_insert_with(|| state.clone());
        Ok(state)
    }
}
