use tracing::debug;

use crate::error::ValidationError;
use crate::habit::{generate_key, Habit, NewHabit, ICON_PALETTE, USER_HABIT_COLOR};

/// Validates `candidate` and appends it to the registry, preserving insertion
/// order. The input slice is not mutated; the updated registry is returned.
pub fn add_habit(registry: &[Habit], candidate: NewHabit) -> Result<Vec<Habit>, ValidationError> {
    let label = candidate.label.trim().to_string();
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    let lowered = label.to_lowercase();
    if registry
        .iter()
        .any(|habit| habit.label.to_lowercase() == lowered)
    {
        debug!(%label, "rejected habit with duplicate label");
        return Err(ValidationError::DuplicateLabel(label));
    }
    let start = candidate
        .start_date
        .ok_or(ValidationError::MissingStartDate)?;
    if let Some(end) = candidate.end_date {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
    }

    let icon = if candidate.icon.is_empty() {
        ICON_PALETTE[0].to_string()
    } else {
        candidate.icon
    };
    let key = generate_key(&label);
    debug!(%key, %label, "admitting habit");

    let mut updated = registry.to_vec();
    updated.push(Habit {
        key,
        label,
        icon,
        color: USER_HABIT_COLOR.to_string(),
        start_date: Some(start),
        end_date: candidate.end_date,
    });
    Ok(updated)
}

/// Removes the habit with `key` if present. The returned flag tells the
/// caller to also purge that key's completion marks. Idempotent: removing a
/// missing key returns the registry unchanged.
pub fn remove_habit(registry: &[Habit], key: &str) -> (Vec<Habit>, bool) {
    let updated: Vec<Habit> = registry
        .iter()
        .filter(|habit| habit.key != key)
        .cloned()
        .collect();
    let removed = updated.len() != registry.len();
    (updated, removed)
}
