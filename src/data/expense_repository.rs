use crate::domain::expense::Expense;
use crate::domain::repository::ExpenseRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryExpenseRepository {
    storage: Arc<RwLock<HashMap<String, Expense>>>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryExpenseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    #[instrument(skip(self, expense), fields(expense_id = %expense.id, user_id = %expense.user_id))]
    async fn insert_expense(&self, expense: Expense) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(expense.id.clone(), expense);
        debug!("Expense saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_expenses_by_owner(&self, user_id: &str) -> Result<Vec<Expense>> {
        let storage = self.storage.read().await;
        let mut expenses: Vec<Expense> = storage
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(expenses)
    }

    #[instrument(skip(self))]
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let owned = storage
            .get(expense_id)
            .is_some_and(|e| e.user_id == user_id);
        if owned {
            storage.remove(expense_id);
            debug!("Expense removed from memory storage");
        }
        Ok(owned)
    }
}
