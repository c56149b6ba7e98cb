use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::quote_controller::QuoteController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::quote_dto::{CreateQuoteRequest, QuoteResponse, UpdateQuoteStatusRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::ValidatedJson;

pub fn create_quote_router() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(list_quotes).post(create_quote))
        .route("/quotes/:id", get(get_quote))
        .route("/quotes/:id/status", patch(update_quote_status))
}

/// Un id que no es UUID no puede existir: se responde 404 como a cualquier ausente
fn parse_quote_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Quote not found".to_string()))
}

async fn create_quote(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateQuoteRequest>,
) -> AppResult<(StatusCode, Json<QuoteResponse>)> {
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.create(user.company_id, user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_quotes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<QuoteResponse>>> {
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.list(user.company_id).await?;
    Ok(Json(response))
}

async fn get_quote(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<QuoteResponse>> {
    let id = parse_quote_id(&id)?;
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.get(id, user.company_id).await?;
    Ok(Json(response))
}

async fn update_quote_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateQuoteStatusRequest>,
) -> AppResult<Json<ApiResponse>> {
    let id = parse_quote_id(&id)?;
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.set_status(id, user.company_id, request).await?;
    Ok(Json(response))
}
