use crate::domain::expense::Expense;
use crate::domain::habit::Habit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_habits: usize,
    pub total_streak: u64,
    pub max_streak: u32,
    pub total_expenses: f64,
    pub expense_count: usize,
}

impl Stats {
    pub fn aggregate(habits: &[Habit], expenses: &[Expense]) -> Self {
        Self {
            total_habits: habits.len(),
            total_streak: habits.iter().map(|h| u64::from(h.streak)).sum(),
            max_streak: habits.iter().map(|h| h.streak).max().unwrap_or(0),
            total_expenses: expenses.iter().map(|e| e.amount.inner()).sum(),
            expense_count: expenses.len(),
        }
    }
}
