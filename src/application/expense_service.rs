use crate::domain::dates::parse_calendar_date;
use crate::domain::error::DomainError;
use crate::domain::expense::{CreateExpense, Expense};
use crate::domain::repository::ExpenseRepository;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct ExpenseService<R: ExpenseRepository> {
    repository: Arc<R>,
}

impl<R: ExpenseRepository> ExpenseService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, req), fields(amount = req.amount.inner(), category = %req.category))]
    pub async fn create_expense(&self, user_id: &str, req: CreateExpense) -> Result<Expense> {
        req.validate()?;
        let date = parse_calendar_date(&req.date)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            amount: req.amount,
            category: req.category.trim().to_string(),
            description: req.description,
            date,
            payment_method: req.payment_method,
            created_at: Utc::now(),
        };
        self.repository.insert_expense(expense.clone()).await?;

        info!(expense_id = %expense.id, "Expense created");
        Ok(expense)
    }

    pub async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.repository.find_expenses_by_owner(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        if !self.repository.delete_expense(user_id, expense_id).await? {
            return Err(DomainError::NotFound("Expense not found".to_string()).into());
        }
        info!("Expense deleted");
        Ok(())
    }
}
