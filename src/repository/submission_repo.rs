use crate::model::submission::{NewSubmission, Submission};
use crate::repository::repository_error::RepositoryResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Access to the remote `submissions` table, the single source of truth.
///
/// Callers own their caches; implementations only touch the store.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Inserts one row. The store assigns `id`, `created_at` and `updated_at`.
    async fn create(&self, submission: NewSubmission) -> RepositoryResult<Submission>;
    /// Every row, newest `created_at` first.
    async fn list_all(&self) -> RepositoryResult<Vec<Submission>>;
    /// Deletes the row with this id. A missing id is not an error.
    async fn delete_one(&self, id: Uuid) -> RepositoryResult<()>;
    /// Deletes every row.
    async fn delete_all(&self) -> RepositoryResult<()>;
}
