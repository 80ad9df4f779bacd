use crate::domain::dates::parse_calendar_date;
use crate::domain::error::DomainError;
use crate::domain::habit::{CompleteHabit, CreateHabit, Habit};
use crate::domain::repository::HabitRepository;
use crate::domain::streak::record_completion;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct HabitService<R: HabitRepository> {
    repository: Arc<R>,
}

impl<R: HabitRepository> HabitService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create_habit(&self, user_id: &str, req: CreateHabit) -> Result<Habit> {
        req.validate()?;

        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: req.name.trim().to_string(),
            category: req.category.trim().to_string(),
            color: req.color,
            icon: req.icon,
            streak: 0,
            completions: Vec::new(),
            created_at: Utc::now(),
        };
        self.repository.insert_habit(habit.clone()).await?;

        info!(habit_id = %habit.id, "Habit created");
        Ok(habit)
    }

    pub async fn list_habits(&self, user_id: &str) -> Result<Vec<Habit>> {
        self.repository.find_habits_by_owner(user_id).await
    }

    /// Records a completion against today's UTC date.
    pub async fn complete_habit(
        &self,
        user_id: &str,
        habit_id: &str,
        req: CompleteHabit,
    ) -> Result<Habit> {
        let today = Utc::now().date_naive();
        self.complete_habit_on(user_id, habit_id, req, today).await
    }

    #[instrument(skip(self, req), fields(date = %req.date))]
    pub async fn complete_habit_on(
        &self,
        user_id: &str,
        habit_id: &str,
        req: CompleteHabit,
        today: NaiveDate,
    ) -> Result<Habit> {
        let date = parse_calendar_date(&req.date)?;

        let habit = self
            .repository
            .update_habit(
                user_id,
                habit_id,
                Box::new(move |habit: &mut Habit| {
                    let outcome = record_completion(&habit.completions, date, today);
                    if !outcome.inserted {
                        debug!(%date, "Completion already recorded");
                    }
                    habit.completions = outcome.completions;
                    habit.streak = outcome.streak;
                }),
            )
            .await?
            .ok_or_else(|| {
                warn!("Habit not found for completion");
                DomainError::NotFound("Habit not found".to_string())
            })?;

        info!(habit_id = %habit.id, streak = habit.streak, %date, "Habit completed");
        Ok(habit)
    }

    #[instrument(skip(self))]
    pub async fn delete_habit(&self, user_id: &str, habit_id: &str) -> Result<()> {
        if !self.repository.delete_habit(user_id, habit_id).await? {
            return Err(DomainError::NotFound("Habit not found".to_string()).into());
        }
        info!("Habit deleted");
        Ok(())
    }
}
