use crate::domain::expense::Expense;
use crate::domain::habit::Habit;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

/// In-place change applied to a single habit while the store holds it exclusively.
pub type HabitMutation = Box<dyn FnOnce(&mut Habit) + Send>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `DomainError::DuplicateEmail` if the email is already taken.
    async fn insert_user(&self, user: User) -> Result<()>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

/// Every lookup is scoped to the owning user id.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    async fn insert_habit(&self, habit: Habit) -> Result<()>;
    async fn find_habits_by_owner(&self, user_id: &str) -> Result<Vec<Habit>>;
    async fn find_habit(&self, user_id: &str, habit_id: &str) -> Result<Option<Habit>>;
    /// Atomic read-modify-write. Returns the updated habit, or `None` if the
    /// user owns no habit with that id.
    async fn update_habit(
        &self,
        user_id: &str,
        habit_id: &str,
        mutation: HabitMutation,
    ) -> Result<Option<Habit>>;
    async fn delete_habit(&self, user_id: &str, habit_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn insert_expense(&self, expense: Expense) -> Result<()>;
    async fn find_expenses_by_owner(&self, user_id: &str) -> Result<Vec<Expense>>;
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool>;
}
