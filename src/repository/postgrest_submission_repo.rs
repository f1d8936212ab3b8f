use crate::config::supabase_conf::SupabaseConfig;
use crate::model::submission::{NewSubmission, Submission};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::submission_repo::SubmissionRepository;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Talks to the Supabase REST interface of the submissions table.
pub struct PostgrestSubmissionRepository {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl PostgrestSubmissionRepository {
    /// Create a new PostgrestSubmissionRepository using SupabaseConfig
    pub fn new(config: &SupabaseConfig) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("comparadise-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RepositoryError::connection(format!("Failed to build HTTP client: {}", e)))?;
        let endpoint = config.table_endpoint();
        info!(endpoint = %endpoint, "PostgREST submission repository ready");
        Ok(PostgrestSubmissionRepository {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }
}

/// Normalises a non-2xx PostgREST response into a repository error carrying
/// the backend's human-readable message.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> RepositoryError {
    let parsed = serde_json::from_str::<PostgrestErrorBody>(body).ok();
    let code = parsed.as_ref().and_then(|b| b.code.clone()).unwrap_or_default();
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.trim().to_string()
            }
        });
    let message = match parsed.and_then(|b| b.details) {
        Some(details) if !details.is_empty() => format!("{} ({})", message, details),
        _ => message,
    };

    if status == StatusCode::CONFLICT || code == "23505" {
        RepositoryError::already_exists(message)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        RepositoryError::connection(message)
    } else if status == StatusCode::NOT_FOUND {
        RepositoryError::not_found(message)
    } else if status == StatusCode::BAD_REQUEST || code.starts_with("22") || code.starts_with("23") {
        RepositoryError::validation(message)
    } else {
        RepositoryError::database(message)
    }
}

#[async_trait]
impl SubmissionRepository for PostgrestSubmissionRepository {

    #[tracing::instrument(skip(self, submission), fields(submission_type = %submission.submission_type))]
    async fn create(&self, submission: NewSubmission) -> RepositoryResult<Submission> {
        info!("Creating new submission");
        let request = self
            .authorized(self.client.post(&self.endpoint))
            .header("Prefer", "return=representation")
            .json(&[&submission]);
        let response = match request.send().await {
            Ok(r) => Self::check(r).await,
            Err(e) => Err(RepositoryError::from(e)),
        };
        let response = match response {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to create submission: {}", e);
                return Err(e);
            }
        };
        let mut rows: Vec<Submission> = response.json().await?;
        match rows.pop() {
            Some(created) => {
                info!(id = %created.id, "Submission created successfully");
                Ok(created)
            },
            None => {
                error!("Store returned no representation for inserted submission");
                Err(RepositoryError::serialization("Insert returned no rows"))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<Submission>> {
        info!("Listing all submissions");
        let request = self
            .authorized(self.client.get(&self.endpoint))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = match request.send().await {
            Ok(r) => Self::check(r).await,
            Err(e) => Err(RepositoryError::from(e)),
        };
        match response {
            Ok(r) => {
                let submissions: Vec<Submission> = r.json().await?;
                info!("Fetched {} submissions", submissions.len());
                Ok(submissions)
            },
            Err(e) => {
                error!("Failed to list submissions: {}", e);
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete_one(&self, id: Uuid) -> RepositoryResult<()> {
        info!("Deleting submission");
        let filter = format!("eq.{}", id);
        let request = self
            .authorized(self.client.delete(&self.endpoint))
            .query(&[("id", filter.as_str())]);
        match request.send().await {
            Ok(r) => {
                Self::check(r).await.map_err(|e| {
                    error!("Failed to delete submission: {}", e);
                    e
                })?;
                debug!("Delete by id acknowledged");
                Ok(())
            },
            Err(e) => {
                error!("Failed to delete submission: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete_all(&self) -> RepositoryResult<()> {
        info!("Deleting all submissions");
        // PostgREST refuses unfiltered deletes; this predicate holds for every row.
        let request = self
            .authorized(self.client.delete(&self.endpoint))
            .query(&[("id", "not.is.null")]);
        match request.send().await {
            Ok(r) => {
                Self::check(r).await.map_err(|e| {
                    error!("Failed to delete all submissions: {}", e);
                    e
                })?;
                info!("All submissions deleted");
                Ok(())
            },
            Err(e) => {
                error!("Failed to delete all submissions: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}
