//! Backend de presupuestos para empresas de encimeras (multi-tenant)
//!
//! Registro de empresas, login con token de sesión, branding, perfil de
//! empresa y presupuestos, todo acotado a la empresa del token.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
