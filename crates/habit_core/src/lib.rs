pub mod error;
pub mod habit;
pub mod ledger;
pub mod progress;
pub mod registry;

pub use crate::error::ValidationError;
pub use crate::habit::{default_habits, generate_key, slugify, Habit, NewHabit, ICON_PALETTE};
pub use crate::ledger::{CompletionLedger, LedgerPatch};
pub use crate::progress::{
    active_window, progress, week_days, HabitProgress, MotivationTier,
};
pub use crate::registry::{add_habit, remove_habit};
