use brokerage_intake::workflows::intake::{
    BrokerNotification, IdentifierKind, Nip, NotifierError, RepositoryError, SubmissionEnvelope,
    SubmissionId, SubmissionNotifier, SubmissionRepository, SubmissionStatus,
};
use brokerage_intake::workflows::registry::{
    CompanyRegistry, RegistryCompany, RegistryError, RegistrySource,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<HashMap<SubmissionId, SubmissionEnvelope>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, envelope: SubmissionEnvelope) -> Result<SubmissionEnvelope, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&envelope.submission_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(envelope.submission_id.clone(), envelope.clone());
        Ok(envelope)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionEnvelope>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending_review(&self, limit: usize) -> Result<Vec<SubmissionEnvelope>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut pending: Vec<SubmissionEnvelope> = guard
            .values()
            .filter(|envelope| envelope.status == SubmissionStatus::PepReview)
            .cloned()
            .collect();
        pending.sort_by_key(|envelope| envelope.received_at);
        pending.truncate(limit);
        Ok(pending)
    }
}

/// Records notifications and logs them; stands in for the back-office mailer.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotifier {
    events: Arc<Mutex<Vec<BrokerNotification>>>,
}

impl SubmissionNotifier for InMemoryNotifier {
    fn notify(&self, notification: BrokerNotification) -> Result<(), NotifierError> {
        info!(
            template = %notification.template,
            submission_id = %notification.submission_id,
            "broker notification queued"
        );
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryNotifier {
    pub(crate) fn events(&self) -> Vec<BrokerNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

/// Fixed registry answers so the prefill endpoint works without network access.
#[derive(Clone)]
pub(crate) struct StaticCompanyRegistry {
    companies: Arc<HashMap<String, RegistryCompany>>,
}

impl StaticCompanyRegistry {
    pub(crate) fn new(companies: Vec<RegistryCompany>) -> Self {
        let companies = companies
            .into_iter()
            .map(|company| (IdentifierKind::Nip.sanitize(&company.nip), company))
            .collect();
        Self {
            companies: Arc::new(companies),
        }
    }

    pub(crate) fn with_sample_companies() -> Self {
        Self::new(vec![
            RegistryCompany {
                source: RegistrySource::Krs,
                name: "Kowalski Consulting Sp. z o.o.".to_string(),
                nip: "123-456-32-18".to_string(),
                regon: "123456785".to_string(),
                krs: Some("0000123456".to_string()),
                street: "ul. Marszałkowska".to_string(),
                building_number: "12A".to_string(),
                apartment_number: None,
                city: "Warszawa".to_string(),
                postal_code: "00950".to_string(),
            },
            RegistryCompany {
                source: RegistrySource::Ceidg,
                name: "Anna Nowak Usługi Księgowe".to_string(),
                nip: "5260250274".to_string(),
                regon: "012345678".to_string(),
                krs: None,
                street: "ul. Długa".to_string(),
                building_number: "5".to_string(),
                apartment_number: Some("2".to_string()),
                city: "Gdańsk".to_string(),
                postal_code: "80-827".to_string(),
            },
        ])
    }
}

impl CompanyRegistry for StaticCompanyRegistry {
    fn lookup(&self, nip: &Nip) -> Result<Option<RegistryCompany>, RegistryError> {
        Ok(self.companies.get(nip.as_str()).cloned())
    }
}

pub(crate) fn parse_identifier_kind(raw: &str) -> Result<IdentifierKind, String> {
    IdentifierKind::parse(raw).ok_or_else(|| {
        format!("unknown identifier kind '{raw}' (expected nip, pesel, regon or krs)")
    })
}
