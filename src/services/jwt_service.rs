//! Servicio JWT
//!
//! Emite y verifica los tokens de sesión. Tokens sin estado (HS256),
//! válidos 7 días, con `userId`, `companyId` y `role`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::auth::JwtClaims;
use crate::models::user::UserRole;
use crate::utils::errors::AppError;

/// Vida de un token de sesión
pub const TOKEN_TTL_DAYS: i64 = 7;

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Servicio JWT; la clave se inyecta una vez al arrancar
#[derive(Clone)]
pub struct JwtService {
    keys: Arc<Keys>,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            validation,
        }
    }

    /// Genera un token de sesión
    pub fn issue(&self, user_id: Uuid, company_id: Uuid, role: UserRole) -> Result<String, AppError> {
        self.issue_at(user_id, company_id, role, Utc::now())
    }

    /// Genera un token como si se hubiera emitido en `issued_at`
    pub fn issue_at(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        role: UserRole,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = JwtClaims {
            user_id,
            company_id,
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| AppError::Jwt(format!("Error generating token: {}", e)))
    }

    /// Valida y decodifica un token
    ///
    /// Token mal formado → `Unauthorized`; firma inválida o expirado → `Forbidden`.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        decode::<JwtClaims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_) => {
                    AppError::Unauthorized("Malformed token".to_string())
                }
                ErrorKind::ExpiredSignature => AppError::Forbidden("Token expired".to_string()),
                _ => AppError::Forbidden("Invalid token".to_string()),
            })
    }
}

/// Extraer el token del header Authorization
pub fn extract_bearer_token(auth_header: Option<&str>) -> Result<&str, AppError> {
    let header = auth_header
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authorization header must be 'Bearer <token>'".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-min-32-characters-long")
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let jwt = service();
        let (user_id, company_id) = (Uuid::new_v4(), Uuid::new_v4());

        let token = jwt.issue(user_id, company_id, UserRole::TradeAdmin).unwrap();
        let claims = jwt.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.company_id, company_id);
        assert_eq!(claims.role, UserRole::TradeAdmin);
        assert_eq!(claims.exp - claims.iat, Duration::days(TOKEN_TTL_DAYS).num_seconds());
    }

    #[test]
    fn test_expired_token_is_forbidden() {
        let jwt = service();
        let issued_at = Utc::now() - Duration::days(TOKEN_TTL_DAYS) - Duration::seconds(5);
        let token = jwt
            .issue_at(Uuid::new_v4(), Uuid::new_v4(), UserRole::TradeUser, issued_at)
            .unwrap();

        assert!(matches!(jwt.verify(&token), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_token_valid_until_seven_days() {
        let jwt = service();
        let issued_at = Utc::now() - Duration::days(TOKEN_TTL_DAYS) + Duration::minutes(5);
        let token = jwt
            .issue_at(Uuid::new_v4(), Uuid::new_v4(), UserRole::TradeUser, issued_at)
            .unwrap();

        assert!(jwt.verify(&token).is_ok());
    }

    #[test]
    fn test_foreign_signature_is_forbidden() {
        let other = JwtService::new("another-secret-key-min-32-characters-long");
        let token = other
            .issue(Uuid::new_v4(), Uuid::new_v4(), UserRole::TradeAdmin)
            .unwrap();

        assert!(matches!(service().verify(&token), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_garbage_token_is_unauthenticated() {
        assert!(matches!(service().verify("not-a-token"), Err(AppError::Unauthorized(_))));
        assert!(matches!(service().verify("a.b.c"), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(matches!(extract_bearer_token(None), Err(AppError::Unauthorized(_))));
        assert!(matches!(extract_bearer_token(Some("Basic dXNlcg==")), Err(AppError::Unauthorized(_))));
        assert!(matches!(extract_bearer_token(Some("Bearer ")), Err(AppError::Unauthorized(_))));
    }
}
