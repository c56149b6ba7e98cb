//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL (ver `migrations/`).

pub mod auth;
pub mod branding;
pub mod company;
pub mod quote;
pub mod user;
