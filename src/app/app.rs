use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use crate::config::{AdminConfig, AppConfig, CsvConfig, JwtConfig, StoreBackend, SupabaseConfig};
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::memory_submission_repo::InMemorySubmissionRepository;
use crate::repository::postgrest_submission_repo::PostgrestSubmissionRepository;
use crate::repository::submission_repo::SubmissionRepository;
use crate::router::admin_router::admin_router;
use crate::router::submission_router::submission_router;
use crate::service::admin_auth_service::AdminAuthServiceImpl;
use crate::service::submission_service::SubmissionServiceImpl;
use crate::util::csv_export::CsvExporter;
use crate::util::jwt::JwtTokenUtilsImpl;

pub type StartupError = Box<dyn std::error::Error + Send + Sync>;

pub struct App {
    config: AppConfig,
    router: Router,
    pub submission_service: Arc<SubmissionServiceImpl>,
    pub admin_auth_service: Arc<AdminAuthServiceImpl>,
}

impl App {
    /// Loads every configuration section and wires the services. Fails when a
    /// required setting (Supabase URL/key, admin password, JWT secret) is missing.
    pub async fn new() -> Result<Self, StartupError> {
        let config = AppConfig::from_env();

        let repo: Arc<dyn SubmissionRepository> = match config.store_backend {
            StoreBackend::Postgrest => {
                let supabase_config = SupabaseConfig::from_env()?;
                Arc::new(PostgrestSubmissionRepository::new(&supabase_config)?)
            }
            StoreBackend::Memory => {
                warn!("Using the in-memory submission store; data is lost on restart");
                Arc::new(InMemorySubmissionRepository::new())
            }
        };

        let csv_config = CsvConfig::from_env()?;
        let exporter = csv_config.offset().map(CsvExporter::new).unwrap_or_default();

        let jwt_config = JwtConfig::from_env()?;
        let admin_config = AdminConfig::from_env()?;
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        let submission_service = Arc::new(SubmissionServiceImpl::new(repo, exporter));
        let admin_auth_service = Arc::new(AdminAuthServiceImpl::new(admin_config, jwt_utils.clone()));

        let admin_auth_state = Arc::new(AdminAuthState {
            jwt_utils,
            auth_service: admin_auth_service.clone(),
        });

        let router = build_router(submission_service.clone(), admin_auth_service.clone(), admin_auth_state);
        Ok(App { config, router, submission_service, admin_auth_service })
    }

    pub async fn start(self) -> Result<(), StartupError> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

pub fn build_router(
    submission_service: Arc<SubmissionServiceImpl>,
    admin_auth_service: Arc<AdminAuthServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    Router::new()
        .merge(submission_router(submission_service, admin_auth_state))
        .merge(admin_router(admin_auth_service))
        .route("/health", get(|| async { "OK" }))
}
