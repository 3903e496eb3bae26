use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::intake::domain::{AddressDraft, ConsentsDraft, FormDraft, PersonalDataDraft};
use crate::workflows::intake::pep::{PepDeclarationsDraft, PepGroupDraft};
use crate::workflows::intake::repository::{
    BrokerNotification, NotifierError, RepositoryError, SubmissionEnvelope, SubmissionId,
    SubmissionNotifier, SubmissionRepository, SubmissionStatus,
};
use crate::workflows::intake::{intake_router, FormSchema, IntakeService};

pub(super) const VALID_NIP: &str = "1234563218";
pub(super) const VALID_PESEL: &str = "44051401359";
pub(super) const VALID_REGON: &str = "123456785";
pub(super) const VALID_KRS: &str = "0000123456";

pub(super) fn address() -> AddressDraft {
    AddressDraft {
        street: "Marszałkowska".to_string(),
        building_number: "12A".to_string(),
        apartment_number: "4".to_string(),
        city: "Warszawa".to_string(),
        postal_code: "00-950".to_string(),
    }
}

pub(super) fn personal_data() -> PersonalDataDraft {
    PersonalDataDraft {
        first_name: "Jan".to_string(),
        last_name: "Kowalski".to_string(),
        pesel: VALID_PESEL.to_string(),
        without_pesel: false,
        phone: "600 700 800".to_string(),
        email: "jan.kowalski@example.pl".to_string(),
        address: address(),
    }
}

pub(super) fn answered(flag: bool, data: &[(&str, &str)]) -> PepGroupDraft {
    PepGroupDraft {
        flag: Some(flag),
        data: data
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(super) fn no_pep() -> PepDeclarationsDraft {
    PepDeclarationsDraft {
        personal: answered(false, &[]),
        family: answered(false, &[]),
        coworker: answered(false, &[]),
    }
}

pub(super) fn consumer_draft() -> FormDraft {
    FormDraft {
        user_type: Some("consumer".to_string()),
        personal_data: personal_data(),
        pep_declarations: no_pep(),
        company_data: Default::default(),
        consents: ConsentsDraft {
            terms: true,
            privacy_policy: true,
            marketing: false,
        },
    }
}

pub(super) fn company_draft() -> FormDraft {
    let mut draft = consumer_draft();
    draft.user_type = Some("company".to_string());
    draft.company_data.name = "Kowalski Consulting sp. z o.o.".to_string();
    draft.company_data.nip = VALID_NIP.to_string();
    draft.company_data.regon = VALID_REGON.to_string();
    draft.company_data.krs = VALID_KRS.to_string();
    draft.company_data.registry_signature = format!("KRS {VALID_KRS}");
    draft.company_data.address = address();
    draft
}

pub(super) fn pep_draft() -> FormDraft {
    let mut draft = consumer_draft();
    draft.pep_declarations.family = answered(
        true,
        &[
            ("fullName", "Anna Kowalska"),
            ("relationship", "siostra"),
            ("position", "Posłanka"),
        ],
    );
    draft
}

pub(super) fn draft_json(draft: &FormDraft) -> Value {
    serde_json::to_value(draft).expect("draft serializes")
}

pub(super) fn build_service() -> (
    IntakeService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = IntakeService::new(FormSchema::default(), repository.clone(), notifier.clone());
    (service, repository, notifier)
}

pub(super) fn router_with_service(
    service: IntakeService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    intake_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SubmissionId, SubmissionEnvelope>>>,
}

impl SubmissionRepository for MemoryRepository {
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
        Ok(guard
            .values()
            .filter(|envelope| envelope.status == SubmissionStatus::PepReview)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<BrokerNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<BrokerNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn templates(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| event.template)
            .collect()
    }
}

impl SubmissionNotifier for MemoryNotifier {
    fn notify(&self, notification: BrokerNotification) -> Result<(), NotifierError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl SubmissionRepository for ConflictRepository {
    fn insert(&self, _envelope: SubmissionEnvelope) -> Result<SubmissionEnvelope, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<SubmissionEnvelope>, RepositoryError> {
        Ok(None)
    }

    fn pending_review(&self, _limit: usize) -> Result<Vec<SubmissionEnvelope>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn insert(&self, _envelope: SubmissionEnvelope) -> Result<SubmissionEnvelope, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<SubmissionEnvelope>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending_review(&self, _limit: usize) -> Result<Vec<SubmissionEnvelope>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingNotifier;

impl SubmissionNotifier for FailingNotifier {
    fn notify(&self, _notification: BrokerNotification) -> Result<(), NotifierError> {
        Err(NotifierError::Transport("smtp relay down".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
