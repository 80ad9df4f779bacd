pub mod dates;
pub mod error;
pub mod expense;
pub mod habit;
pub mod repository;
pub mod stats;
pub mod streak;
pub mod user;
