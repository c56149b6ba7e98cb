pub mod auth_dto;
pub mod branding_dto;
pub mod company_dto;
pub mod quote_dto;
