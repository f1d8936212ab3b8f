use tracing::{info, error, instrument};
use crate::dto::submission_dto::{ContactRequest, QuoteRequest};
use crate::model::submission::{NewSubmission, Submission, SubmissionStats};
use crate::repository::submission_repo::SubmissionRepository;
use crate::util::csv_export::{CsvExport, CsvExporter};
use crate::util::error::ServiceError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use async_trait::async_trait;

pub const SAVE_CONTEXT: &str = "Error saving submission";
pub const FETCH_CONTEXT: &str = "Error fetching submissions";
pub const DELETE_CONTEXT: &str = "Error deleting submission";
pub const CLEAR_CONTEXT: &str = "Error clearing submissions";

#[async_trait]
pub trait SubmissionService: Send + Sync {
	// Lead capture
	async fn submit_quote(&self, request: QuoteRequest) -> Result<Submission, ServiceError>;
	async fn submit_contact(&self, request: ContactRequest) -> Result<Submission, ServiceError>;
	async fn create_submission(&self, submission: NewSubmission) -> Result<Submission, ServiceError>;

	// Admin lifecycle
	async fn list_submissions(&self) -> Result<Vec<Submission>, ServiceError>;
	async fn delete_submission(&self, id: Uuid) -> Result<(), ServiceError>;
	async fn clear_submissions(&self) -> Result<(), ServiceError>;
	async fn stats(&self, now: DateTime<Utc>) -> Result<SubmissionStats, ServiceError>;
	async fn export_csv(&self, now: DateTime<Utc>) -> Result<CsvExport, ServiceError>;
}

pub struct SubmissionServiceImpl {
	pub repo: Arc<dyn SubmissionRepository>,
	pub exporter: CsvExporter,
}

impl SubmissionServiceImpl {
	pub fn new(repo: Arc<dyn SubmissionRepository>, exporter: CsvExporter) -> Self {
		SubmissionServiceImpl { repo, exporter }
	}
}

fn validated<T: Validate>(request: &T) -> Result<(), ServiceError> {
	request
		.validate()
		.map_err(|e| ServiceError::InvalidInput(format!("Validation error: {}", e)))
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
	#[instrument(skip(self, request), fields(service_type = %request.service_type))]
	async fn submit_quote(&self, request: QuoteRequest) -> Result<Submission, ServiceError> {
		info!("Quote form submitted");
		validated(&request)?;
		self.create_submission(request.into()).await
	}

	#[instrument(skip(self, request))]
	async fn submit_contact(&self, request: ContactRequest) -> Result<Submission, ServiceError> {
		info!("Contact form submitted");
		validated(&request)?;
		self.create_submission(request.into()).await
	}

	#[instrument(skip(self, submission), fields(submission_type = %submission.submission_type))]
	async fn create_submission(&self, submission: NewSubmission) -> Result<Submission, ServiceError> {
		let res = self.repo.create(submission).await;
		match &res {
			Ok(created) => info!(id = %created.id, "Submission saved"),
			Err(e) => error!("Failed to save submission: {e}"),
		}
		res.map_err(|e| ServiceError::from(e).with_context(SAVE_CONTEXT))
	}

	#[instrument(skip(self))]
	async fn list_submissions(&self) -> Result<Vec<Submission>, ServiceError> {
		info!("Listing submissions");
		let res = self.repo.list_all().await;
		match &res {
			Ok(rows) => info!("Fetched {} submissions", rows.len()),
			Err(e) => error!("Failed to list submissions: {e}"),
		}
		res.map_err(|e| ServiceError::from(e).with_context(FETCH_CONTEXT))
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_submission(&self, id: Uuid) -> Result<(), ServiceError> {
		info!("Deleting submission");
		let res = self.repo.delete_one(id).await;
		match &res {
			Ok(_) => info!("Submission deleted"),
			Err(e) => error!("Failed to delete submission: {e}"),
		}
		res.map_err(|e| ServiceError::from(e).with_context(DELETE_CONTEXT))
	}

	#[instrument(skip(self))]
	async fn clear_submissions(&self) -> Result<(), ServiceError> {
		info!("Clearing all submissions");
		let res = self.repo.delete_all().await;
		match &res {
			Ok(_) => info!("All submissions cleared"),
			Err(e) => error!("Failed to clear submissions: {e}"),
		}
		res.map_err(|e| ServiceError::from(e).with_context(CLEAR_CONTEXT))
	}

	async fn stats(&self, now: DateTime<Utc>) -> Result<SubmissionStats, ServiceError> {
		let rows = self.list_submissions().await?;
		Ok(SubmissionStats::compute(&rows, now))
	}

	#[instrument(skip(self))]
	async fn export_csv(&self, now: DateTime<Utc>) -> Result<CsvExport, ServiceError> {
		let rows = self.list_submissions().await?;
		let export = self.exporter.export(&rows, now);
		info!(filename = %export.filename, rows = rows.len(), "CSV export generated");
		Ok(export)
	}
}
