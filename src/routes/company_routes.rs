use axum::{extract::State, routing::put, Extension, Json, Router};

use crate::controllers::company_controller::CompanyController;
use crate::dto::company_dto::{ApiResponse, UpdateCompanyRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::ValidatedJson;

pub fn create_company_router() -> Router<AppState> {
    Router::new().route("/company", put(update_company))
}

async fn update_company(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateCompanyRequest>,
) -> AppResult<Json<ApiResponse>> {
    let controller = CompanyController::new(state.pool.clone());
    let response = controller.update(user.company_id, request).await?;
    Ok(Json(response))
}
