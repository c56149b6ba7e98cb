//! Middleware de autenticación JWT
//!
//! Extrae el token Bearer, lo verifica con la clave de la aplicación e
//! inyecta un `AuthenticatedUser` en las extensions de la request. No
//! consulta la base de datos: los claims son la identidad.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::models::auth::JwtClaims;
use crate::models::user::UserRole;
use crate::services::jwt_service::extract_bearer_token;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub role: UserRole,
}

impl From<JwtClaims> for AuthenticatedUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: claims.user_id,
            company_id: claims.company_id,
            role: claims.role,
        }
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = extract_bearer_token(auth_header)?;
    let claims = state.jwt.verify(token)?;

    debug!("🔐 Request autenticada: usuario {} empresa {}", claims.user_id, claims.company_id);

    request.extensions_mut().insert(AuthenticatedUser::from(claims));

    Ok(next.run(request).await)
}
