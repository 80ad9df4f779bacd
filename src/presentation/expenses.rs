use crate::domain::expense::CreateExpense;
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

#[instrument(skip(state, user, req), fields(user_id = %user.0.id))]
pub async fn create_expense(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateExpense>,
) -> Result<HttpResponse, ApiError> {
    info!(amount = req.amount.inner(), category = %req.category, "Creating expense");
    let expense = state
        .expense_service
        .create_expense(&user.0.id, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create expense");
            e
        })?;
    Ok(HttpResponse::Created().json(expense))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_expenses(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let expenses = state.expense_service.list_expenses(&user.0.id).await?;
    Ok(HttpResponse::Ok().json(expenses))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id, expense_id = %*path))]
pub async fn delete_expense(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let expense_id = path.into_inner();
    state
        .expense_service
        .delete_expense(&user.0.id, &expense_id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Expense deleted".to_string(),
    }))
}
