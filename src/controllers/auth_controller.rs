use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};
use crate::models::branding::Branding;
use crate::models::company::{normalize_company_name, Company};
use crate::models::user::{normalize_email, User};
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::{JwtService, PasswordService};
use crate::state::AppState;
use crate::utils::errors::AppError;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthController {
    companies: CompanyRepository,
    users: UserRepository,
    jwt: JwtService,
    passwords: PasswordService,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            companies: CompanyRepository::new(state.pool.clone()),
            users: UserRepository::new(state.pool.clone()),
            jwt: state.jwt.clone(),
            passwords: state.passwords.clone(),
        }
    }

    /// Registro de una empresa nueva con su usuario administrador
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);
        let password_hash = self.passwords.hash(&request.password).await?;

        let company = Company::new(
            normalize_company_name(&request.company_name),
            email.clone(),
            request.phone,
            request.postcode,
        );
        let branding = Branding::default_for(company.id);
        let user = User::new_admin(
            company.id,
            email,
            password_hash,
            request.first_name,
            request.last_name,
        );

        let (company, user) = self.companies.register_tenant(&company, &branding, &user).await?;
        let token = self.jwt.issue(user.id, company.id, user.role)?;

        info!("🏢 Empresa registrada: {} ({})", company.name, company.id);

        Ok(AuthResponse {
            token,
            user: user.into(),
            company: company.into(),
        })
    }

    /// Login por email y contraseña
    ///
    /// Email desconocido, usuario inactivo y contraseña errónea devuelven
    /// el mismo error y consumen el mismo tiempo de bcrypt.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);

        let mut user = match self.users.find_by_email(&email).await? {
            Some(user) if user.is_active => user,
            Some(user) => {
                self.passwords.verify_against_dummy(&request.password).await;
                warn!("🔒 Login de usuario inactivo: {}", user.id);
                return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
            }
            None => {
                self.passwords.verify_against_dummy(&request.password).await;
                return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !self.passwords.verify(&request.password, &user.password_hash).await? {
            warn!("🔒 Contraseña incorrecta para usuario {}", user.id);
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }

        user.last_login_at = Some(self.users.touch_last_login(user.id).await?);

        let company = self
            .companies
            .find_by_id(user.company_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("User {} has no company", user.id)))?;

        let token = self.jwt.issue(user.id, company.id, user.role)?;

        info!("🔑 Login correcto: usuario {} empresa {}", user.id, company.id);

        Ok(AuthResponse {
            token,
            user: user.into(),
            company: company.into(),
        })
    }

    /// Perfil del usuario autenticado junto con su empresa
    pub async fn me(&self, user_id: Uuid, company_id: Uuid) -> Result<ProfileResponse, AppError> {
        let user = self
            .users
            .find_in_company(user_id, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        Ok(ProfileResponse {
            user: user.into(),
            company: company.into(),
        })
    }
}
