use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{FormDraft, ValidatedForm};
use super::issues::ValidationReport;
use super::pep::PepGroupKind;
use super::progress::{form_progress, FormProgress};
use super::repository::{
    BrokerNotification, RepositoryError, SubmissionEnvelope, SubmissionId,
    SubmissionNotifier, SubmissionRepository, SubmissionStatus,
};
use super::schema::FormSchema;

pub const INTAKE_RECEIVED_TEMPLATE: &str = "contract_intake_received";
pub const PEP_REVIEW_TEMPLATE: &str = "pep_enhanced_due_diligence";

/// Service composing the form schema, submission storage and broker notifications.
pub struct IntakeService<R, N> {
    schema: Arc<FormSchema>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("sub-{id:06}"))
}

impl<R, N> IntakeService<R, N>
where
    R: SubmissionRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    pub fn new(schema: FormSchema, repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            schema: Arc::new(schema),
            repository,
            notifier,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Validate a draft without storing anything.
    pub fn validate(&self, draft: &FormDraft) -> Result<ValidatedForm, ValidationReport> {
        self.schema.validate(draft)
    }

    pub fn progress(&self, draft: &FormDraft) -> FormProgress {
        form_progress(&self.schema, draft)
    }

    /// Validate, store and announce a submission.
    pub fn submit(&self, draft: &FormDraft) -> Result<SubmissionEnvelope, IntakeServiceError> {
        let record = match self.schema.prepare_submission(draft) {
            Ok(record) => record,
            Err(report) => {
                warn!(issues = report.len(), "intake submission rejected");
                return Err(report.into());
            }
        };

        let politically_exposed = record.is_politically_exposed();
        let envelope = SubmissionEnvelope {
            submission_id: next_submission_id(),
            received_at: Utc::now(),
            status: if politically_exposed {
                SubmissionStatus::PepReview
            } else {
                SubmissionStatus::Received
            },
            record,
        };

        let stored = self.repository.insert(envelope)?;
        info!(
            submission_id = %stored.submission_id,
            user_type = %stored.record.user_type(),
            politically_exposed,
            "intake submission accepted"
        );

        let mut details = BTreeMap::new();
        details.insert(
            "user_type".to_string(),
            stored.record.user_type().to_string(),
        );
        details.insert("status".to_string(), stored.status.label().to_string());
        self.dispatch(BrokerNotification {
            template: INTAKE_RECEIVED_TEMPLATE.to_string(),
            submission_id: stored.submission_id.clone(),
            details,
        });

        if politically_exposed {
            let declarations = &stored.record.form().shared.pep_declarations;
            let groups: Vec<&str> = PepGroupKind::ALL
                .into_iter()
                .filter(|kind| declarations.group(*kind).flag)
                .map(PepGroupKind::key)
                .collect();

            let mut details = BTreeMap::new();
            details.insert("groups".to_string(), groups.join(","));
            self.dispatch(BrokerNotification {
                template: PEP_REVIEW_TEMPLATE.to_string(),
                submission_id: stored.submission_id.clone(),
                details,
            });
        }

        Ok(stored)
    }

    /// Runs after the envelope is stored; a failed notification is logged and
    /// never fails the submission.
    fn dispatch(&self, notification: BrokerNotification) {
        let submission_id = notification.submission_id.clone();
        let template = notification.template.clone();
        if let Err(err) = self.notifier.notify(notification) {
            warn!(
                submission_id = %submission_id,
                template = %template,
                error = %err,
                "broker notification failed"
            );
        }
    }

    pub fn get(&self, submission_id: &SubmissionId) -> Result<SubmissionEnvelope, IntakeServiceError> {
        let envelope = self
            .repository
            .fetch(submission_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(envelope)
    }

    /// Submissions waiting for enhanced due diligence.
    pub fn pending_review(&self, limit: usize) -> Result<Vec<SubmissionEnvelope>, IntakeServiceError> {
        Ok(self.repository.pending_review(limit)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationReport),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
