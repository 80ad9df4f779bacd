use crate::application::auth_service::Session;
use crate::domain::user::{CreateUser, LoginRequest, UserProfile};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            user: UserProfile::from(&session.user),
            token: session.token,
        }
    }
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    info!("Signup request received");

    let session = state
        .auth_service
        .signup(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to sign up user");
            ApiError::from(e)
        })?;

    info!(user_id = %session.user.id, "User signed up successfully");
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let session = state
        .auth_service
        .login(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to login");
            ApiError::from(e)
        })?;

    info!(user_id = %session.user.id, "Login successful");
    Ok(HttpResponse::Ok().json(AuthResponse::from(session)))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let stored = state.auth_service.profile(&user.0.id).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(&stored)))
}
