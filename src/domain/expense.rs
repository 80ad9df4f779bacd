use crate::domain::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAYMENT_METHOD: &str = "UPI";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

/// Non-negative, finite monetary amount.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::Validation(
                "Amount must be a non-negative number".to_string(),
            ));
        }
        Ok(Amount(value))
    }

    pub fn inner(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExpense {
    pub amount: Amount,
    pub category: String,
    pub description: String,
    /// Raw date; parsed into a calendar date by the service.
    pub date: String,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    DEFAULT_PAYMENT_METHOD.to_string()
}

impl CreateExpense {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.category.trim().is_empty() {
            return Err(DomainError::Validation(
                "Expense category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
