use crate::domain::repository::{ExpenseRepository, HabitRepository};
use crate::domain::stats::Stats;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct StatsService<H: HabitRepository, E: ExpenseRepository> {
    habits: Arc<H>,
    expenses: Arc<E>,
}

impl<H: HabitRepository, E: ExpenseRepository> StatsService<H, E> {
    pub fn new(habits: Arc<H>, expenses: Arc<E>) -> Self {
        Self { habits, expenses }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self, user_id: &str) -> Result<Stats> {
        let habits = self.habits.find_habits_by_owner(user_id).await?;
        let expenses = self.expenses.find_expenses_by_owner(user_id).await?;

        let stats = Stats::aggregate(&habits, &expenses);
        debug!(
            total_habits = stats.total_habits,
            expense_count = stats.expense_count,
            "Stats aggregated"
        );
        Ok(stats)
    }
}
