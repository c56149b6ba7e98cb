//! Modelo de User
//!
//! Usuarios de una empresa. El email es único a nivel global y el hash
//! de la contraseña nunca se serializa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    TradeAdmin,
    TradeUser,
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub company_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Primer usuario de una empresa: siempre administrador
    pub fn new_admin(
        company_id: Uuid,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            email,
            password_hash,
            first_name,
            last_name,
            role: UserRole::TradeAdmin,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Normaliza el email para búsquedas y unicidad
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
