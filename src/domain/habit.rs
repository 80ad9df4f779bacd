use crate::domain::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HABIT_COLOR: &str = "#4F46E5";
pub const DEFAULT_HABIT_ICON: &str = "target";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub color: String,
    pub icon: String,
    /// Cached length of the current run, refreshed on every completion.
    pub streak: u32,
    /// Sorted ascending, no duplicates.
    pub completions: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHabit {
    pub name: String,
    pub category: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_color() -> String {
    DEFAULT_HABIT_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_HABIT_ICON.to_string()
}

impl CreateHabit {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Habit name must not be empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::Validation(
                "Habit category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Raw completion date; may carry a time component, which is discarded.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteHabit {
    pub date: String,
}
