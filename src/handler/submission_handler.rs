use axum::{extract::{State, Path}, response::IntoResponse, Json, http::{header, StatusCode}};
use crate::handler::extract::{AppJson, AppQuery};
use crate::dto::submission_dto::{ClearAllQuery, ContactRequest, QuoteRequest, StatsResponseDto};
use crate::service::submission_service::{SubmissionServiceImpl, SubmissionService};
use crate::util::csv_export::CSV_CONTENT_TYPE;
use crate::util::error::HandlerError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

// Handler: Quote form (public)
pub async fn create_quote_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    AppJson(payload): AppJson<QuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_quote_handler] Handler called");
    let created = service.submit_quote(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// Handler: Contact form (public)
pub async fn create_contact_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    AppJson(payload): AppJson<ContactRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_contact_handler] Handler called");
    let created = service.submit_contact(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// Handler: List Submissions (admin only)
pub async fn list_submissions_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let submissions = service.list_submissions().await?;
    Ok(Json(submissions))
}

// Handler: Summary counts (admin only)
pub async fn submission_stats_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = service.stats(Utc::now()).await?;
    Ok(Json(StatsResponseDto { stats }))
}

// Handler: CSV download (admin only)
pub async fn export_submissions_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let export = service.export_csv(Utc::now()).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    ))
}

// Handler: Delete one Submission (admin only)
pub async fn delete_submission_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = Uuid::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid submission id"))?;
    service.delete_submission(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Handler: Delete every Submission (admin only, explicit confirmation)
pub async fn clear_submissions_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    AppQuery(params): AppQuery<ClearAllQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    if !params.confirm {
        warn!("[clear_submissions_handler] Refused without confirm=true");
        return Err(HandlerError::bad_request("Deleting all submissions requires confirm=true"));
    }
    service.clear_submissions().await?;
    Ok(StatusCode::NO_CONTENT)
}
