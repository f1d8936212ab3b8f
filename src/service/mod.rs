pub mod submission_service;
pub mod admin_auth_service;
