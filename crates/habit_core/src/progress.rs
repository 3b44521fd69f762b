use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::habit::Habit;
use crate::ledger::CompletionLedger;

/// Derived completion statistics for one habit at a reference date. Nothing
/// here is cached; callers recompute from the registry and ledger on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitProgress {
    pub window_len: usize,
    pub done: usize,
    pub percent: u8,
    pub tier: MotivationTier,
}

/// Qualitative tier derived from the completion percentage. Selects display
/// copy only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotivationTier {
    Complete,
    Great,
    GoodStart,
    SmallStep,
    NotStarted,
}

impl MotivationTier {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            p if p >= 100 => Self::Complete,
            p if p >= 70 => Self::Great,
            p if p >= 40 => Self::GoodStart,
            p if p > 0 => Self::SmallStep,
            _ => Self::NotStarted,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Complete => "Mükemmel! Tüm hafta tamamlandı!",
            Self::Great => "Harika gidiyorsun!",
            Self::GoodStart => "İyi başladın, devam et!",
            Self::SmallStep => "Her gün bir adım!",
            Self::NotStarted => "Hadi bu hafta bir alışkanlık başlat!",
        }
    }
}

/// The inclusive day sequence a habit is tracked over, ascending, one entry
/// per calendar date. Empty when the start date is missing or the effective
/// end (`min(end_date, today)`) falls before it.
pub fn active_window(habit: &Habit, today: NaiveDate) -> Vec<NaiveDate> {
    let Some(start) = habit.start_date else {
        return Vec::new();
    };
    let effective_end = match habit.end_date {
        Some(end) => end.min(today),
        None => today,
    };
    if effective_end < start {
        return Vec::new();
    }
    let len = (effective_end - start).num_days() as usize + 1;
    let mut days = Vec::with_capacity(len);
    let mut day = start;
    while day <= effective_end {
        days.push(day);
        day = day + Duration::days(1);
    }
    days
}

/// Completion percentage over the habit's active window, rounded to the
/// nearest integer; `0` for an empty window. Never fails: degenerate input
/// degrades to empty/zero.
pub fn progress(habit: &Habit, ledger: &CompletionLedger, today: NaiveDate) -> HabitProgress {
    let window = active_window(habit, today);
    let done = window
        .iter()
        .filter(|date| ledger.is_done(&habit.key, **date))
        .count();
    let percent = if window.is_empty() {
        0
    } else {
        (100.0 * done as f64 / window.len() as f64).round() as u8
    };
    HabitProgress {
        window_len: window.len(),
        done,
        percent,
        tier: MotivationTier::from_percent(percent),
    }
}

/// The Sunday-start week containing `today`, for rendering the weekly strip.
pub fn week_days(today: NaiveDate) -> Vec<NaiveDate> {
    let start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}
