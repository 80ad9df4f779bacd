use crate::domain::habit::Habit;
use crate::domain::repository::{HabitMutation, HabitRepository};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryHabitRepository {
    storage: Arc<RwLock<HashMap<String, Habit>>>,
}

impl InMemoryHabitRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryHabitRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    #[instrument(skip(self, habit), fields(habit_id = %habit.id, user_id = %habit.user_id))]
    async fn insert_habit(&self, habit: Habit) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(habit.id.clone(), habit);
        debug!("Habit saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_habits_by_owner(&self, user_id: &str) -> Result<Vec<Habit>> {
        let storage = self.storage.read().await;
        let mut habits: Vec<Habit> = storage
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect();
        habits.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        trace!(count = habits.len(), "Habits loaded for owner");
        Ok(habits)
    }

    #[instrument(skip(self))]
    async fn find_habit(&self, user_id: &str, habit_id: &str) -> Result<Option<Habit>> {
        let storage = self.storage.read().await;
        Ok(storage
            .get(habit_id)
            .filter(|h| h.user_id == user_id)
            .cloned())
    }

    #[instrument(skip(self, mutation))]
    async fn update_habit(
        &self,
        user_id: &str,
        habit_id: &str,
        mutation: HabitMutation,
    ) -> Result<Option<Habit>> {
        let mut storage = self.storage.write().await;
        let Some(habit) = storage.get_mut(habit_id).filter(|h| h.user_id == user_id) else {
            trace!("No owned habit to update");
            return Ok(None);
        };

        mutation(&mut *habit);
        debug!(streak = habit.streak, completions = habit.completions.len(), "Habit updated");
        Ok(Some(habit.clone()))
    }

    #[instrument(skip(self))]
    async fn delete_habit(&self, user_id: &str, habit_id: &str) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let owned = storage
            .get(habit_id)
            .is_some_and(|h| h.user_id == user_id);
        if owned {
            storage.remove(habit_id);
            debug!("Habit removed from memory storage");
        }
        Ok(owned)
    }
}
