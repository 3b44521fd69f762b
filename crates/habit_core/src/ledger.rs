use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-habit, per-day completion marks. An absent date is equivalent to
/// `false`. Marks outside a habit's active window are stored but never
/// counted, because window derivation excludes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CompletionLedger(BTreeMap<String, BTreeMap<NaiveDate, bool>>);

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the mark for `(habit_key, date)`. Idempotent for a
    /// fixed triple.
    pub fn set_day(&mut self, habit_key: &str, date: NaiveDate, done: bool) {
        self.0
            .entry(habit_key.to_string())
            .or_default()
            .insert(date, done);
    }

    pub fn is_done(&self, habit_key: &str, date: NaiveDate) -> bool {
        self.0
            .get(habit_key)
            .and_then(|marks| marks.get(&date))
            .copied()
            .unwrap_or(false)
    }

    /// Drops every mark recorded for `habit_key`. Idempotent.
    pub fn purge_habit(&mut self, habit_key: &str) {
        self.0.remove(habit_key);
    }

    pub fn habit_marks(&self, habit_key: &str) -> Option<&BTreeMap<NaiveDate, bool>> {
        self.0.get(habit_key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies a partial update: each habit present in the patch has its
    /// listed dates overwritten, everything else stays untouched. An empty
    /// per-habit map is a tombstone that drops the whole sub-mapping.
    pub fn apply(&mut self, patch: &LedgerPatch) {
        for (habit_key, cells) in patch.iter() {
            if cells.is_empty() {
                self.0.remove(habit_key);
            } else {
                self.0
                    .entry(habit_key.clone())
                    .or_default()
                    .extend(cells.iter().map(|(date, done)| (*date, *done)));
            }
        }
    }
}

/// A merge write against the completion ledger. Only the habits/dates listed
/// here may be overwritten by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LedgerPatch(BTreeMap<String, BTreeMap<NaiveDate, bool>>);

impl LedgerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-cell update.
    pub fn mark(habit_key: &str, date: NaiveDate, done: bool) -> Self {
        let mut patch = Self::default();
        patch.set(habit_key, date, done);
        patch
    }

    /// Deletes `habit_key`'s entire sub-mapping when applied.
    pub fn tombstone(habit_key: &str) -> Self {
        Self(BTreeMap::from([(habit_key.to_string(), BTreeMap::new())]))
    }

    pub fn set(&mut self, habit_key: &str, date: NaiveDate, done: bool) {
        self.0
            .entry(habit_key.to_string())
            .or_default()
            .insert(date, done);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<NaiveDate, bool>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
