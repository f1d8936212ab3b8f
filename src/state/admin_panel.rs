//! Admin dashboard state: the gate, a cached copy of the submission list, and
//! the transient status lines shown after each action.
//!
//! The cache is only replaced by `refresh` and only shrunk by successful
//! deletes. A failed operation never touches it.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::model::submission::{Submission, SubmissionStats};
use crate::service::admin_auth_service::AdminAuthService;
use crate::service::submission_service::SubmissionService;
use crate::state::flash::{visible, FlashMessage};
use crate::util::csv_export::{CsvExport, CsvExporter};
use crate::util::error::ServiceError;
use crate::util::jwt::SessionToken;

pub const SUCCESS_TTL_SECS: i64 = 3;
pub const ERROR_TTL_SECS: i64 = 5;
pub const LOAD_ERROR_MESSAGE: &str = "Erreur lors du chargement des données";
pub const DELETED_MESSAGE: &str = "Soumission supprimée";
pub const CLEARED_MESSAGE: &str = "Toutes les soumissions ont été supprimées";

pub struct AdminPanel {
    auth: Arc<dyn AdminAuthService>,
    service: Arc<dyn SubmissionService>,
    exporter: CsvExporter,
    session: Option<SessionToken>,
    submissions: Vec<Submission>,
    selected: Option<Uuid>,
    loading: bool,
    success: Option<FlashMessage>,
    error: Option<FlashMessage>,
}

impl AdminPanel {
    pub fn new(
        auth: Arc<dyn AdminAuthService>,
        service: Arc<dyn SubmissionService>,
        exporter: CsvExporter,
    ) -> Self {
        AdminPanel {
            auth,
            service,
            exporter,
            session: None,
            submissions: Vec::new(),
            selected: None,
            loading: false,
            success: None,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn success_message(&self, now: DateTime<Utc>) -> Option<&str> {
        visible(&self.success, now)
    }

    pub fn error_message(&self, now: DateTime<Utc>) -> Option<&str> {
        visible(&self.error, now)
    }

    /// Checks the password with the server-side gate. On success the panel
    /// opens and loads the submissions once.
    pub async fn login(&mut self, password: &str) -> Result<(), ServiceError> {
        match self.auth.login(password).await {
            Ok(session) => {
                info!("Admin panel unlocked");
                self.session = Some(session);
                self.error = None;
                // a failed first load is reported through the error line
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!("Admin panel login failed: {}", e);
                self.error = Some(FlashMessage::sticky(e.message()));
                Err(e)
            }
        }
    }

    /// Returns to the locked state and drops everything cached.
    pub fn logout(&mut self) {
        self.session = None;
        self.submissions.clear();
        self.selected = None;
        self.success = None;
        self.error = None;
        self.loading = false;
    }

    fn ensure_authenticated(&self) -> Result<(), ServiceError> {
        match self.session {
            Some(_) => Ok(()),
            None => Err(ServiceError::Unauthorized("Admin session required".to_string())),
        }
    }

    /// Replaces the cache with a fresh listing. On failure the previous cache stays visible.
    pub async fn refresh(&mut self) -> Result<usize, ServiceError> {
        self.begin_refresh()?;
        let res = self.service.list_submissions().await;
        self.complete_refresh(res, Utc::now())
    }

    /// Marks a listing as in flight. The cache stays readable meanwhile.
    pub fn begin_refresh(&mut self) -> Result<(), ServiceError> {
        self.ensure_authenticated()?;
        self.loading = true;
        Ok(())
    }

    /// Applies the listing started by `begin_refresh`.
    pub fn complete_refresh(
        &mut self,
        outcome: Result<Vec<Submission>, ServiceError>,
        now: DateTime<Utc>,
    ) -> Result<usize, ServiceError> {
        self.loading = false;
        match outcome {
            Ok(rows) => {
                let count = rows.len();
                self.submissions = rows;
                if let Some(id) = self.selected {
                    if !self.submissions.iter().any(|s| s.id == id) {
                        self.selected = None;
                    }
                }
                self.success = Some(FlashMessage::expiring(
                    format!("{} soumissions chargées", count),
                    now,
                    Duration::seconds(SUCCESS_TTL_SECS),
                ));
                Ok(count)
            }
            Err(e) => {
                error!("Error loading submissions: {}", e);
                self.error = Some(FlashMessage::sticky(LOAD_ERROR_MESSAGE));
                Err(e)
            }
        }
    }

    /// Deletes one submission once the operator confirmed. Returns `false`
    /// when the confirmation was declined.
    pub async fn delete_row(&mut self, id: Uuid, confirmed: bool) -> Result<bool, ServiceError> {
        self.ensure_authenticated()?;
        if !confirmed {
            return Ok(false);
        }
        self.error = None;
        self.success = None;
        let res = self.service.delete_submission(id).await;
        let now = Utc::now();
        match res {
            Ok(()) => {
                self.submissions.retain(|s| s.id != id);
                if self.selected == Some(id) {
                    self.selected = None;
                }
                self.success = Some(FlashMessage::expiring(
                    DELETED_MESSAGE,
                    now,
                    Duration::seconds(SUCCESS_TTL_SECS),
                ));
                Ok(true)
            }
            Err(e) => {
                error!("Error deleting submission: {}", e);
                self.error = Some(FlashMessage::expiring(
                    e.message(),
                    now,
                    Duration::seconds(ERROR_TTL_SECS),
                ));
                Err(e)
            }
        }
    }

    /// Deletes every submission once the operator confirmed.
    pub async fn clear_all(&mut self, confirmed: bool) -> Result<bool, ServiceError> {
        self.ensure_authenticated()?;
        if !confirmed {
            return Ok(false);
        }
        self.error = None;
        self.success = None;
        let res = self.service.clear_submissions().await;
        let now = Utc::now();
        match res {
            Ok(()) => {
                self.submissions.clear();
                self.selected = None;
                self.success = Some(FlashMessage::expiring(
                    CLEARED_MESSAGE,
                    now,
                    Duration::seconds(SUCCESS_TTL_SECS),
                ));
                Ok(true)
            }
            Err(e) => {
                error!("Error clearing submissions: {}", e);
                self.error = Some(FlashMessage::expiring(
                    e.message(),
                    now,
                    Duration::seconds(ERROR_TTL_SECS),
                ));
                Err(e)
            }
        }
    }

    /// Serialises the cached list, not a fresh fetch.
    pub fn export_csv(&self, now: DateTime<Utc>) -> Result<CsvExport, ServiceError> {
        self.ensure_authenticated()?;
        Ok(self.exporter.export(&self.submissions, now))
    }

    pub fn stats(&self, now: DateTime<Utc>) -> SubmissionStats {
        SubmissionStats::compute(&self.submissions, now)
    }

    /// Opens the detail view for a cached submission.
    pub fn select(&mut self, id: Uuid) -> Option<&Submission> {
        let found = self.submissions.iter().find(|s| s.id == id);
        self.selected = found.map(|s| s.id);
        found
    }

    pub fn selected(&self) -> Option<&Submission> {
        self.selected
            .and_then(|id| self.submissions.iter().find(|s| s.id == id))
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}
