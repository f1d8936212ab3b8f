mod common;

use chrono::{Duration, Utc};
use async_trait::async_trait;
use common::{seeded_rows, submission, CountingRepository};
use comparadise_backend::dto::submission_dto::{ContactRequest, QuoteRequest};
use comparadise_backend::model::submission::{NewSubmission, ServiceType, Submission, SubmissionType, CONTACT_SERVICE_TYPE};
use comparadise_backend::repository::memory_submission_repo::InMemorySubmissionRepository;
use comparadise_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use comparadise_backend::repository::submission_repo::SubmissionRepository;
use comparadise_backend::service::submission_service::{
    SubmissionService, SubmissionServiceImpl, CLEAR_CONTEXT, DELETE_CONTEXT, FETCH_CONTEXT, SAVE_CONTEXT,
};
use comparadise_backend::util::csv_export::CsvExporter;
use comparadise_backend::util::error::ServiceError;
use std::sync::Arc;
use uuid::Uuid;

/// Answers like a store whose constraints or schema reject every call.
struct RejectingRepository;

#[async_trait]
impl SubmissionRepository for RejectingRepository {
    async fn create(&self, _submission: NewSubmission) -> RepositoryResult<Submission> {
        Err(RepositoryError::validation("null value in column \"email\""))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Submission>> {
        Err(RepositoryError::not_found("relation \"submissions\" does not exist"))
    }

    async fn delete_one(&self, _id: Uuid) -> RepositoryResult<()> {
        Err(RepositoryError::already_exists("duplicate key"))
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        Err(RepositoryError::database("permission denied for table submissions"))
    }
}

fn service_with(repo: Arc<CountingRepository>) -> SubmissionServiceImpl {
    SubmissionServiceImpl::new(repo, CsvExporter::default())
}

fn memory_service() -> SubmissionServiceImpl {
    SubmissionServiceImpl::new(Arc::new(InMemorySubmissionRepository::new()), CsvExporter::default())
}

fn marie_quote() -> QuoteRequest {
    QuoteRequest {
        first_name: "Marie".to_string(),
        last_name: "Tremblay".to_string(),
        email: "m@x.com".to_string(),
        phone: Some("5145551234".to_string()),
        service_type: ServiceType::Habitation,
    }
}

fn contact_request() -> ContactRequest {
    ContactRequest {
        first_name: "Jean".to_string(),
        last_name: "Roy".to_string(),
        email: "jean@roy.ca".to_string(),
        phone: None,
        message: Some("Rappelez-moi, svp".to_string()),
    }
}

#[tokio::test]
async fn test_quote_round_trip() {
    let service = memory_service();
    let created = service.submit_quote(marie_quote()).await.unwrap();
    assert_eq!(created.first_name, "Marie");
    assert_eq!(created.last_name, "Tremblay");
    assert_eq!(created.email, "m@x.com");
    assert_eq!(created.phone.as_deref(), Some("5145551234"));
    assert_eq!(created.service_type, "Habitation");
    assert_eq!(created.submission_type, SubmissionType::Quote);
    assert_eq!(created.message, None);

    let listed = service.list_submissions().await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_contact_round_trip() {
    let service = memory_service();
    let created = service.submit_contact(contact_request()).await.unwrap();
    assert_eq!(created.service_type, CONTACT_SERVICE_TYPE);
    assert_eq!(created.submission_type, SubmissionType::Contact);
    assert_eq!(created.message.as_deref(), Some("Rappelez-moi, svp"));
    assert_eq!(created.phone, None);

    let listed = service.list_submissions().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[tokio::test]
async fn test_invalid_email_is_rejected_before_the_store() {
    let repo = Arc::new(CountingRepository::default());
    let service = service_with(repo.clone());
    let mut request = marie_quote();
    request.email = "not-an-email".to_string();
    let err = service.submit_quote(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(repo.inner.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let now = Utc::now();
    let rows = vec![
        submission("Old", SubmissionType::Quote, now - Duration::days(2)),
        submission("New", SubmissionType::Contact, now),
        submission("Mid", SubmissionType::Quote, now - Duration::hours(3)),
    ];
    let service = service_with(Arc::new(CountingRepository::with_rows(rows)));
    let listed = service.list_submissions().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|s| s.first_name.as_str()).collect();
    assert_eq!(names, vec!["New", "Mid", "Old"]);
    assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn test_delete_one_is_idempotent() {
    let now = Utc::now();
    let rows = seeded_rows(now);
    let target = rows[2].id;
    let service = service_with(Arc::new(CountingRepository::with_rows(rows)));

    service.delete_submission(target).await.unwrap();
    let listed = service.list_submissions().await.unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed.iter().all(|s| s.id != target));

    service.delete_submission(target).await.unwrap();
    service.delete_submission(Uuid::new_v4()).await.unwrap();
    assert_eq!(service.list_submissions().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let service = service_with(Arc::new(CountingRepository::with_rows(seeded_rows(Utc::now()))));
    service.clear_submissions().await.unwrap();
    assert!(service.list_submissions().await.unwrap().is_empty());
    // clearing an empty store succeeds too
    service.clear_submissions().await.unwrap();
}

#[tokio::test]
async fn test_stats_counts() {
    let now = Utc::now();
    let service = service_with(Arc::new(CountingRepository::with_rows(seeded_rows(now))));
    let stats = service.stats(now).await.unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.quotes, 3);
    assert_eq!(stats.contacts, 2);
    assert_eq!(stats.last_24h, 3);
}

#[tokio::test]
async fn test_export_uses_fresh_listing() {
    let now = Utc::now();
    let service = service_with(Arc::new(CountingRepository::with_rows(seeded_rows(now))));
    let export = service.export_csv(now).await.unwrap();
    assert_eq!(export.content.lines().count(), 6);
    assert!(export.filename.starts_with("comparadise-submissions-"));
    assert!(export.filename.ends_with(".csv"));
}

#[tokio::test]
async fn test_store_failures_carry_operation_context() {
    let repo = Arc::new(CountingRepository::default());
    repo.set_failing(true);
    let service = service_with(repo);

    let cases = vec![
        (service.submit_quote(marie_quote()).await.map(|_| ()), SAVE_CONTEXT),
        (service.list_submissions().await.map(|_| ()), FETCH_CONTEXT),
        (service.delete_submission(Uuid::new_v4()).await, DELETE_CONTEXT),
        (service.clear_submissions().await, CLEAR_CONTEXT),
    ];
    for (result, context) in cases {
        let err = result.unwrap_err();
        assert!(matches!(err, ServiceError::StoreError(_)));
        assert_eq!(err.message(), format!("{}: network down", context));
    }

    // constraint and schema failures are store errors too
    let service = SubmissionServiceImpl::new(Arc::new(RejectingRepository), CsvExporter::default());
    let cases = vec![
        (service.submit_quote(marie_quote()).await.map(|_| ()), SAVE_CONTEXT, "null value in column \"email\""),
        (service.list_submissions().await.map(|_| ()), FETCH_CONTEXT, "relation \"submissions\" does not exist"),
        (service.delete_submission(Uuid::new_v4()).await, DELETE_CONTEXT, "duplicate key"),
        (service.clear_submissions().await, CLEAR_CONTEXT, "permission denied for table submissions"),
    ];
    for (result, context, detail) in cases {
        let err = result.unwrap_err();
        assert_eq!(err, ServiceError::StoreError(format!("{}: {}", context, detail)));
    }
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    let repo = Arc::new(CountingRepository::default());
    let service = service_with(repo.clone());

    let mut request = marie_quote();
    request.first_name = "   ".to_string();
    request.last_name = "\t".to_string();
    let err = service.submit_quote(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let mut request = contact_request();
    request.first_name = " ".to_string();
    let err = service.submit_contact(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    assert!(repo.inner.list_all().await.unwrap().is_empty());
}
