pub mod repository_error;
pub mod submission_repo;
pub mod postgrest_submission_repo;
pub mod memory_submission_repo;
