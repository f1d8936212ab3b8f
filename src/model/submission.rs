use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service type stored for every contact-form submission.
pub const CONTACT_SERVICE_TYPE: &str = "Contact général";

/// Which form produced a submission. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Quote,
    Contact,
}

impl SubmissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::Quote => "quote",
            SubmissionType::Contact => "contact",
        }
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insurance lines offered on the quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "Automobile")]
    Automobile,
    #[serde(rename = "Habitation")]
    Habitation,
    #[serde(rename = "Entreprise")]
    Entreprise,
    #[serde(rename = "Avantages sociaux")]
    AvantagesSociaux,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Automobile,
        ServiceType::Habitation,
        ServiceType::Entreprise,
        ServiceType::AvantagesSociaux,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Automobile => "Automobile",
            ServiceType::Habitation => "Habitation",
            ServiceType::Entreprise => "Entreprise",
            ServiceType::AvantagesSociaux => "Avantages sociaux",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lead record as stored in the `submissions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub service_type: String,
    #[serde(default)]
    pub message: Option<String>,
    pub submission_type: SubmissionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; identity and timestamps are left to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub submission_type: SubmissionType,
}

impl NewSubmission {
    /// Materialises the row the way the store would, with the given identity and clock.
    pub fn into_submission(self, id: Uuid, now: DateTime<Utc>) -> Submission {
        Submission {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            service_type: self.service_type,
            message: self.message,
            submission_type: self.submission_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Summary counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total: usize,
    pub quotes: usize,
    pub contacts: usize,
    pub last_24h: usize,
}

impl SubmissionStats {
    pub fn compute(submissions: &[Submission], now: DateTime<Utc>) -> Self {
        let since = now - Duration::hours(24);
        submissions.iter().fold(SubmissionStats::default(), |mut stats, s| {
            stats.total += 1;
            match s.submission_type {
                SubmissionType::Quote => stats.quotes += 1,
                SubmissionType::Contact => stats.contacts += 1,
            }
            if s.created_at > since {
                stats.last_24h += 1;
            }
            stats
        })
    }
}
