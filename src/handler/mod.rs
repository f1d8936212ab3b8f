pub mod extract;
pub mod submission_handler;
pub mod admin_handler;
