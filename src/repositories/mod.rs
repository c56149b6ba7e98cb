//! Acceso a datos
//!
//! Toda consulta sobre datos de un tenant lleva el predicado
//! `company_id = $n`, salvo el alta y el login (búsqueda por email).

pub mod branding_repository;
pub mod company_repository;
pub mod quote_repository;
pub mod user_repository;
