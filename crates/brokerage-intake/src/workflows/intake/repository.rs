use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{SubmissionRecord, UserType};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Received,
    /// Client declared PEP exposure; a broker must run enhanced due diligence.
    PepReview,
}

impl SubmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Received => "received",
            SubmissionStatus::PepReview => "pep_review",
        }
    }
}

/// Stored submission with intake metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionEnvelope {
    pub submission_id: SubmissionId,
    pub received_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub record: SubmissionRecord,
}

impl SubmissionEnvelope {
    pub fn status_view(&self) -> SubmissionStatusView {
        SubmissionStatusView {
            submission_id: self.submission_id.clone(),
            status: self.status.label(),
            user_type: self.record.user_type(),
            politically_exposed: self.record.is_politically_exposed(),
            received_at: self.received_at,
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, envelope: SubmissionEnvelope) -> Result<SubmissionEnvelope, RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionEnvelope>, RepositoryError>;
    fn pending_review(&self, limit: usize) -> Result<Vec<SubmissionEnvelope>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("submission already exists")]
    Conflict,
    #[error("submission not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook informing the brokerage back office about new submissions.
pub trait SubmissionNotifier: Send + Sync {
    fn notify(&self, notification: BrokerNotification) -> Result<(), NotifierError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerNotification {
    pub template: String,
    pub submission_id: SubmissionId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Public status of a submission; carries no personal data.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStatusView {
    pub submission_id: SubmissionId,
    pub status: &'static str,
    pub user_type: UserType,
    pub politically_exposed: bool,
    pub received_at: DateTime<Utc>,
}
