use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::branding_controller::BrandingController;
use crate::dto::branding_dto::{BrandingResponse, UpdateBrandingRequest};
use crate::dto::company_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::ValidatedJson;

pub fn create_branding_router() -> Router<AppState> {
    Router::new().route("/branding", get(get_branding).put(update_branding))
}

async fn get_branding(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<BrandingResponse>> {
    let controller = BrandingController::new(state.pool.clone());
    let response = controller.get(user.company_id).await?;
    Ok(Json(response))
}

async fn update_branding(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateBrandingRequest>,
) -> AppResult<Json<ApiResponse>> {
    let controller = BrandingController::new(state.pool.clone());
    let response = controller.update(user.company_id, request).await?;
    Ok(Json(response))
}
