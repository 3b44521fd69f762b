use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Icons offered when creating a habit. Cosmetic only.
pub const ICON_PALETTE: [&str; 21] = [
    "🧘", "🏃", "💧", "📚", "🛏️", "🍎", "🧹", "📝", "🧑‍💻", "🧺", "🧴", "🦷", "🧊", "🧃", "🧦",
    "🧢", "🧤", "🧲", "🧪", "🧯", "🧸",
];

/// Color tag assigned to every user-created habit. The seeded defaults carry
/// their own distinct tags.
pub const USER_HABIT_COLOR: &str = "bg-pink-100";

/// A tracked habit as stored in the per-user registry.
///
/// `key` is immutable once created and unique within a registry. A habit
/// without a start date has an undefined active window: no days are ever
/// reported active for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Candidate for registry insertion, before validation and key assignment.
#[derive(Debug, Clone, Default)]
pub struct NewHabit {
    pub label: String,
    pub icon: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NewHabit {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn ending(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }
}

/// The three habits a fresh registry is seeded with.
pub fn default_habits() -> Vec<Habit> {
    vec![
        Habit {
            key: "meditasyon".to_string(),
            label: "Meditasyon".to_string(),
            icon: "🧘".to_string(),
            color: "bg-indigo-100".to_string(),
            start_date: None,
            end_date: None,
        },
        Habit {
            key: "egzersiz".to_string(),
            label: "Egzersiz".to_string(),
            icon: "🏃".to_string(),
            color: "bg-green-100".to_string(),
            start_date: None,
            end_date: None,
        },
        Habit {
            key: "su".to_string(),
            label: "Su İçme".to_string(),
            icon: "💧".to_string(),
            color: "bg-blue-100".to_string(),
            start_date: None,
            end_date: None,
        },
    ]
}

/// Display-only slug: lower-cased, every non-alphanumeric mapped to `_`.
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Stable habit key: label slug plus a short UUID suffix so two habits that
/// slug identically still get distinct keys.
pub fn generate_key(label: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", slugify(label), &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_replaces_punctuation() {
        assert_eq!(slugify("Kitap Okuma"), "kitap_okuma");
        assert_eq!(slugify("Egzersiz!"), "egzersiz_");
    }

    #[test]
    fn generated_keys_differ_for_identical_labels() {
        let a = generate_key("Kitap");
        let b = generate_key("Kitap");
        assert!(a.starts_with("kitap_"));
        assert!(b.starts_with("kitap_"));
        assert_ne!(a, b);
    }

    #[test]
    fn habit_serializes_with_wire_field_names() {
        let habit = Habit {
            key: "kitap_0a1b2c3d".to_string(),
            label: "Kitap".to_string(),
            icon: "📚".to_string(),
            color: USER_HABIT_COLOR.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            end_date: None,
        };
        let json = serde_json::to_value(&habit).expect("serialize habit");
        assert_eq!(json["startDate"], "2024-03-10");
        assert!(json["endDate"].is_null());
        assert_eq!(json["label"], "Kitap");
    }

    #[test]
    fn default_habits_have_no_dates() {
        let defaults = default_habits();
        assert_eq!(defaults.len(), 3);
        assert!(defaults
            .iter()
            .all(|h| h.start_date.is_none() && h.end_date.is_none()));
    }
}
