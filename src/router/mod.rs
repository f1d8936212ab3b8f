pub mod submission_router;
pub mod admin_router;
