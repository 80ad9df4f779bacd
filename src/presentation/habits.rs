use crate::domain::habit::{CompleteHabit, CreateHabit};
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

#[instrument(skip(state, user, req), fields(user_id = %user.0.id, habit_id))]
pub async fn create_habit(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateHabit>,
) -> Result<HttpResponse, ApiError> {
    info!(name = %req.name, category = %req.category, "Creating habit");
    let habit = state
        .habit_service
        .create_habit(&user.0.id, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create habit");
            e
        })?;
    tracing::Span::current().record("habit_id", habit.id.as_str());
    Ok(HttpResponse::Created().json(habit))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_habits(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let habits = state.habit_service.list_habits(&user.0.id).await?;
    info!(count = habits.len(), "Habits listed");
    Ok(HttpResponse::Ok().json(habits))
}

#[instrument(skip(state, user, req), fields(user_id = %user.0.id, habit_id = %*path))]
pub async fn complete_habit(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<CompleteHabit>,
) -> Result<HttpResponse, ApiError> {
    let habit_id = path.into_inner();
    info!(date = %req.date, "Recording habit completion");
    let habit = state
        .habit_service
        .complete_habit(&user.0.id, &habit_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to complete habit");
            e
        })?;
    info!(streak = habit.streak, "Habit completion recorded");
    Ok(HttpResponse::Ok().json(habit))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id, habit_id = %*path))]
pub async fn delete_habit(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let habit_id = path.into_inner();
    state
        .habit_service
        .delete_habit(&user.0.id, &habit_id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Habit deleted".to_string(),
    }))
}
