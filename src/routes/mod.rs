pub mod auth_routes;
pub mod branding_routes;
pub mod company_routes;
pub mod quote_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

/// Router completo de la aplicación (sin capas de transporte)
///
/// `/health` queda en la raíz y sin autenticación; el resto cuelga de
/// `/api`, y todo salvo registro y login pasa por `auth_middleware`.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes::protected_auth_routes())
        .merge(branding_routes::create_branding_router())
        .merge(company_routes::create_company_router())
        .merge(quote_routes::create_quote_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .merge(auth_routes::public_auth_routes())
        .merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
