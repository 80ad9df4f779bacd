pub mod auth_service;
pub mod expense_service;
pub mod habit_service;
pub mod stats_service;
