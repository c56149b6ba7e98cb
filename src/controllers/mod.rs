pub mod auth_controller;
pub mod branding_controller;
pub mod company_controller;
pub mod quote_controller;
