use crate::application::auth_service::AuthService;
use crate::application::expense_service::ExpenseService;
use crate::application::habit_service::HabitService;
use crate::application::stats_service::StatsService;
use crate::data::expense_repository::InMemoryExpenseRepository;
use crate::data::habit_repository::InMemoryHabitRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError, web};
use chrono::{Duration, Utc};
use serde::Serialize;
use std::future::{Ready, ready};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the services; built once at startup
pub struct AppState {
    pub auth_service: AuthService<InMemoryUserRepository>,
    pub habit_service: HabitService<InMemoryHabitRepository>,
    pub expense_service: ExpenseService<InMemoryExpenseRepository>,
    pub stats_service: StatsService<InMemoryHabitRepository, InMemoryExpenseRepository>,
}

impl AppState {
    pub fn in_memory(jwt_secret: String, token_ttl: Duration) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let habits = Arc::new(InMemoryHabitRepository::new());
        let expenses = Arc::new(InMemoryExpenseRepository::new());

        Self {
            auth_service: AuthService::new(users, jwt_secret, token_ttl),
            habit_service: HabitService::new(habits.clone()),
            expense_service: ExpenseService::new(expenses.clone()),
            stats_service: StatsService::new(habits, expenses),
        }
    }
}

// Uniform error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Internal details are logged, never sent to the client.
        let (error_msg, message) = match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Unauthorized(msg) => {
                warn!(error = %self, status = %status, "Request rejected");
                (self.to_string(), msg.clone())
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, status = %status, "Internal error");
                (
                    "Internal server error".to_string(),
                    "Internal server error".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_msg,
            details: serde_json::json!({ "message": message }),
        };

        HttpResponse::build(status).json(error_response)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DuplicateEmail => {
                ApiError::Validation("Email already registered".to_string())
            }
            DomainError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => ApiError::from(domain),
            Err(other) => ApiError::Internal(format!("{:#}", other)),
        }
    }
}

// AuthenticatedUser extractor
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string())))
    }
}

#[derive(Serialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn get_stats(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let stats = state.stats_service.stats(&user.0.id).await.map_err(|e| {
        error!(error = %e, "Failed to aggregate stats");
        e
    })?;
    info!(
        total_habits = stats.total_habits,
        expense_count = stats.expense_count,
        "Stats retrieved"
    );
    Ok(HttpResponse::Ok().json(stats))
}
