pub mod auth;
pub mod expenses;
pub mod handlers;
pub mod habits;
pub mod middleware;
pub mod routes;
