use crate::model::submission::{NewSubmission, Submission};
use crate::repository::repository_error::RepositoryResult;
use crate::repository::submission_repo::SubmissionRepository;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Process-local store with the same semantics as the remote table.
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    rows: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds rows as-is, keeping their ids and timestamps.
    pub fn with_rows(rows: Vec<Submission>) -> Self {
        InMemorySubmissionRepository { rows: RwLock::new(rows) }
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: NewSubmission) -> RepositoryResult<Submission> {
        let created = submission.into_submission(Uuid::new_v4(), Utc::now());
        self.rows.write().await.push(created.clone());
        info!(id = %created.id, "Submission stored in memory");
        Ok(created)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Submission>> {
        let mut rows = self.rows.read().await.clone();
        // ties on created_at keep the most recent insert first
        rows.reverse();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn delete_one(&self, id: Uuid) -> RepositoryResult<()> {
        self.rows.write().await.retain(|s| s.id != id);
        Ok(())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        self.rows.write().await.clear();
        Ok(())
    }
}
