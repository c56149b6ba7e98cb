//! Modelos de autenticación
//!
//! Claims del token de sesión. Es la única fuente de `company_id` para
//! las operaciones acotadas al tenant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserRole;

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JwtClaims {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}
