use crate::presentation::auth::{login, profile, signup};
use crate::presentation::expenses::{create_expense, delete_expense, list_expenses};
use crate::presentation::habits::{complete_habit, create_habit, delete_habit, list_habits};
use crate::presentation::handlers::{ApiError, get_stats, health_check};
use crate::presentation::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Registers every endpoint under `/api`. Only the protected scope runs the
/// bearer token check; signup, login and health never look at the header.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .route("/auth/signup", web::post().to(signup))
                .route("/auth/login", web::post().to(login))
                .service(
                    web::scope("")
                        .wrap(JwtAuthMiddleware)
                        .route("/user/profile", web::get().to(profile))
                        .route("/habits", web::post().to(create_habit))
                        .route("/habits", web::get().to(list_habits))
                        .route("/habits/{id}/complete", web::post().to(complete_habit))
                        .route("/habits/{id}", web::delete().to(delete_habit))
                        .route("/expenses", web::post().to(create_expense))
                        .route("/expenses", web::get().to(list_expenses))
                        .route("/expenses/{id}", web::delete().to(delete_expense))
                        .route("/stats", web::get().to(get_stats)),
                ),
        );
}

// Malformed bodies and paths get the same error shape as every other rejection.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}
