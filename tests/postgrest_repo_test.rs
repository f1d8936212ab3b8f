use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use comparadise_backend::config::SupabaseConfig;
use comparadise_backend::model::submission::{NewSubmission, SubmissionType};
use comparadise_backend::repository::postgrest_submission_repo::PostgrestSubmissionRepository;
use comparadise_backend::repository::repository_error::RepositoryError;
use comparadise_backend::repository::submission_repo::SubmissionRepository;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

const API_KEY: &str = "stub-anon-key";

/// Requests seen by the stub, as `METHOD query`.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    inserted: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    fn push(&self, method: &str, query: Option<String>) {
        self.calls.lock().unwrap().push(format!("{} {}", method, query.unwrap_or_default()));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    apikey == Some(API_KEY) && bearer == Some(format!("Bearer {}", API_KEY).as_str())
}

fn row(body: &Value) -> Value {
    let now = Utc::now().to_rfc3339();
    let mut row = body.clone();
    row["id"] = json!(Uuid::new_v4());
    row["created_at"] = json!(now);
    row["updated_at"] = json!(now);
    row
}

async fn insert(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Json(body): Json<Vec<Value>>,
) -> impl IntoResponse {
    rec.push("POST", query);
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" })));
    }
    if headers.get("prefer").and_then(|v| v.to_str().ok()) != Some("return=representation") {
        return (StatusCode::CREATED, Json(json!([])));
    }
    let rows: Vec<Value> = body.iter().map(row).collect();
    rec.inserted.lock().unwrap().extend(body);
    (StatusCode::CREATED, Json(Value::Array(rows)))
}

async fn list(State(rec): State<Recorder>, headers: HeaderMap, RawQuery(query): RawQuery) -> impl IntoResponse {
    rec.push("GET", query);
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid API key" })));
    }
    let rows: Vec<Value> = rec.inserted.lock().unwrap().iter().map(row).collect();
    (StatusCode::OK, Json(Value::Array(rows)))
}

async fn remove(State(rec): State<Recorder>, RawQuery(query): RawQuery) -> StatusCode {
    rec.push("DELETE", query);
    StatusCode::NO_CONTENT
}

async fn conflict(State(rec): State<Recorder>, RawQuery(query): RawQuery) -> impl IntoResponse {
    rec.push("POST", query);
    (
        StatusCode::CONFLICT,
        Json(json!({ "code": "23505", "message": "duplicate key value violates unique constraint", "details": null })),
    )
}

async fn spawn_stub() -> (String, Recorder) {
    let rec = Recorder::default();
    let app = Router::new()
        .route("/rest/v1/submissions", post(insert).get(list).delete(remove))
        .route("/rest/v1/broken", post(conflict))
        .with_state(rec.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), rec)
}

fn repo_for(url: &str, table: &str, api_key: &str) -> PostgrestSubmissionRepository {
    let config = SupabaseConfig {
        url: url.to_string(),
        api_key: api_key.to_string(),
        submissions_table: table.to_string(),
        timeout_secs: 2,
    };
    PostgrestSubmissionRepository::new(&config).expect("repository")
}

fn new_quote() -> NewSubmission {
    NewSubmission {
        first_name: "Marie".to_string(),
        last_name: "Tremblay".to_string(),
        email: "m@x.com".to_string(),
        phone: Some("5145551234".to_string()),
        service_type: "Habitation".to_string(),
        message: None,
        submission_type: SubmissionType::Quote,
    }
}

#[tokio::test]
async fn test_create_sends_row_and_returns_representation() {
    let (url, rec) = spawn_stub().await;
    let repo = repo_for(&url, "submissions", API_KEY);

    let created = repo.create(new_quote()).await.unwrap();
    assert_eq!(created.first_name, "Marie");
    assert_eq!(created.submission_type, SubmissionType::Quote);

    let inserted = rec.inserted.lock().unwrap().clone();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0]["service_type"], "Habitation");
    assert_eq!(inserted[0]["submission_type"], "quote");
    // absent optionals are not sent at all
    assert!(inserted[0].get("message").is_none());
}

#[tokio::test]
async fn test_list_orders_by_created_at_desc() {
    let (url, rec) = spawn_stub().await;
    let repo = repo_for(&url, "submissions", API_KEY);
    repo.create(new_quote()).await.unwrap();

    let rows = repo.list_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    let calls = rec.calls();
    let get = calls.iter().find(|c| c.starts_with("GET")).unwrap();
    assert!(get.contains("order=created_at.desc"));
}

#[tokio::test]
async fn test_delete_filters() {
    let (url, rec) = spawn_stub().await;
    let repo = repo_for(&url, "submissions", API_KEY);
    let id = Uuid::new_v4();

    repo.delete_one(id).await.unwrap();
    repo.delete_all().await.unwrap();

    let calls = rec.calls();
    assert_eq!(calls[0], format!("DELETE id=eq.{}", id));
    assert_eq!(calls[1], "DELETE id=not.is.null");
}

#[tokio::test]
async fn test_backend_errors_are_normalised() {
    let (url, _rec) = spawn_stub().await;

    let err = repo_for(&url, "broken", API_KEY).create(new_quote()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    assert_eq!(err.message(), "duplicate key value violates unique constraint");

    let err = repo_for(&url, "submissions", "wrong-key").list_all().await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError(_)));
    assert_eq!(err.message(), "Invalid API key");
}

#[tokio::test]
async fn test_unreachable_store_is_a_connection_error() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let repo = repo_for(&format!("http://{}", addr), "submissions", API_KEY);
    let err = repo.list_all().await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError(_)));
}
