pub mod expense_repository;
pub mod habit_repository;
pub mod user_repository;
