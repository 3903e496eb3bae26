//! Brokerage contract intake: identifier validators, field rules, the
//! discriminated form schema and the submission pipeline built on top of them.
//!
//! Validation is synchronous and side-effect free. Storage and broker
//! notifications sit behind traits so the HTTP surface and the CLI can share
//! the same service.

pub mod domain;
pub mod fields;
pub mod identifiers;
pub mod issues;
pub mod messages;
pub mod pep;
pub mod phone;
pub mod progress;
pub mod repository;
pub mod router;
pub mod schema;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Address, AddressDraft, CompanyData, CompanyDataDraft, CompanyRecord, Consents, ConsentsDraft,
    EmptyCompanyData, FormDraft, PersonalData, PersonalDataDraft, SharedFormData,
    SubmissionRecord, UserType, ValidatedForm, VatConsumerData,
};
pub use identifiers::{
    validate_krs, validate_nip, validate_pesel, validate_regon, IdentifierError,
    IdentifierFailure, IdentifierKind, Krs, Nip, Pesel, Regon, ValidationResult,
};
pub use issues::{IssueKind, ValidationIssue, ValidationReport};
pub use pep::{
    validate_pep_declarations, PepDeclarations, PepDeclarationsDraft, PepGroup, PepGroupDraft,
    PepGroupKind, PepSummary,
};
pub use phone::{PhoneError, PhoneNumber, DEFAULT_CALLING_CODE};
pub use progress::{form_progress, FormProgress, FormStep, StepProgress};
pub use repository::{
    BrokerNotification, NotifierError, RepositoryError, SubmissionEnvelope, SubmissionId,
    SubmissionNotifier, SubmissionRepository, SubmissionStatus, SubmissionStatusView,
};
pub use router::{identifier_router, intake_router};
pub use schema::{validate_pesel_choice, FormSchema};
pub use service::{IntakeService, IntakeServiceError, INTAKE_RECEIVED_TEMPLATE, PEP_REVIEW_TEMPLATE};
