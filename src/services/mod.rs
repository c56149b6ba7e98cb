//! Servicios de la aplicación
//!
//! Contraseñas, tokens de sesión, referencias de presupuesto y precios.

pub mod jwt_service;
pub mod password_service;
pub mod pricing_service;
pub mod quote_reference;

pub use jwt_service::JwtService;
pub use password_service::PasswordService;
