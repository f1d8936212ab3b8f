#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use comparadise_backend::model::submission::{NewSubmission, Submission, SubmissionType, CONTACT_SERVICE_TYPE};
use comparadise_backend::repository::memory_submission_repo::InMemorySubmissionRepository;
use comparadise_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use comparadise_backend::repository::submission_repo::SubmissionRepository;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

pub const ADMIN_PASSWORD: &str = "comparadise2025";

pub fn submission(first_name: &str, kind: SubmissionType, created_at: DateTime<Utc>) -> Submission {
    let service_type = match kind {
        SubmissionType::Quote => "Automobile",
        SubmissionType::Contact => CONTACT_SERVICE_TYPE,
    };
    Submission {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: "Test".to_string(),
        email: format!("{}@test.com", first_name.to_lowercase()),
        phone: None,
        service_type: service_type.to_string(),
        message: None,
        submission_type: kind,
        created_at,
        updated_at: created_at,
    }
}

/// Five rows: three quotes and two contacts, two of them older than a day.
pub fn seeded_rows(now: DateTime<Utc>) -> Vec<Submission> {
    vec![
        submission("Alice", SubmissionType::Quote, now - Duration::hours(1)),
        submission("Bruno", SubmissionType::Quote, now - Duration::hours(5)),
        submission("Chloe", SubmissionType::Contact, now - Duration::hours(10)),
        submission("Denis", SubmissionType::Quote, now - Duration::hours(30)),
        submission("Emma", SubmissionType::Contact, now - Duration::days(3)),
    ]
}

/// Wraps the in-memory store, counts listings and can be switched to fail.
#[derive(Default)]
pub struct CountingRepository {
    pub inner: InMemorySubmissionRepository,
    pub list_calls: AtomicUsize,
    pub failing: AtomicBool,
}

impl CountingRepository {
    pub fn with_rows(rows: Vec<Submission>) -> Self {
        CountingRepository {
            inner: InMemorySubmissionRepository::with_rows(rows),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::connection("network down"));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for CountingRepository {
    async fn create(&self, submission: NewSubmission) -> RepositoryResult<Submission> {
        self.check()?;
        self.inner.create(submission).await
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Submission>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.list_all().await
    }

    async fn delete_one(&self, id: Uuid) -> RepositoryResult<()> {
        self.check()?;
        self.inner.delete_one(id).await
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        self.check()?;
        self.inner.delete_all().await
    }
}
