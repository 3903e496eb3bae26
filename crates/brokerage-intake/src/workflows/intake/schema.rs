//! Composite and discriminated validation of the whole intake form.
//!
//! Each field stops at its first failure; issues are accumulated across fields
//! so a single pass reports everything the client has to fix.

use crate::config::IntakeConfig;

use super::domain::{
    Address, AddressDraft, CompanyData, CompanyDataDraft, CompanyRecord, Consents, ConsentsDraft,
    EmptyCompanyData, FormDraft, PersonalData, PersonalDataDraft, SharedFormData,
    SubmissionRecord, UserType, ValidatedForm, VatConsumerData,
};
use super::fields;
use super::identifiers::{IdentifierError, Krs, Nip, Pesel, Regon};
use super::issues::{IssueCollector, IssueKind, ValidationReport};
use super::messages;
use super::pep;
use super::phone::{PhoneNumber, DEFAULT_CALLING_CODE};

fn join<'a>(prefix: &[&'a str], field: &'a str) -> Vec<&'a str> {
    let mut path = prefix.to_vec();
    path.push(field);
    path
}

/// PESEL is skipped entirely when the client declares they have none.
pub fn validate_pesel_choice(pesel: &str, without_pesel: bool) -> Result<Option<Pesel>, IdentifierError> {
    if without_pesel {
        return Ok(None);
    }
    Pesel::parse(pesel).map(Some)
}

/// Top-level schema; the only tunable is the calling code assumed for bare phone numbers.
#[derive(Debug, Clone)]
pub struct FormSchema {
    default_calling_code: u16,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new(DEFAULT_CALLING_CODE)
    }
}

impl FormSchema {
    pub fn new(default_calling_code: u16) -> Self {
        Self {
            default_calling_code,
        }
    }

    pub fn from_config(config: &IntakeConfig) -> Self {
        Self::new(config.default_calling_code)
    }

    pub fn default_calling_code(&self) -> u16 {
        self.default_calling_code
    }

    /// Validate a draft against the arm selected by `userType` and scrub hidden PEP details.
    pub fn validate(&self, draft: &FormDraft) -> Result<ValidatedForm, ValidationReport> {
        let mut issues = IssueCollector::new();

        let user_type = resolve_user_type(draft.user_type.as_deref(), &mut issues);
        let personal_data =
            self.personal_data(&draft.personal_data, &["personalData"], &mut issues);
        let pep_declarations =
            pep::validate_declarations(&draft.pep_declarations, &["pepDeclarations"], &mut issues);
        let consents = consents(&draft.consents, &["consents"], &mut issues);
        let company = user_type
            .and_then(|user_type| company_data(user_type, &draft.company_data, &mut issues));

        if !issues.is_empty() {
            return Err(issues.into_report());
        }
        let (Some(personal_data), Some(mut pep_declarations), Some(consents), Some(company)) =
            (personal_data, pep_declarations, consents, company)
        else {
            return Err(issues.into_report());
        };

        pep_declarations.scrub_hidden();

        Ok(ValidatedForm {
            shared: SharedFormData {
                personal_data,
                pep_declarations,
                consents,
            },
            company,
        })
    }

    /// Validate and additionally require a client type eligible for submission.
    pub fn prepare_submission(&self, draft: &FormDraft) -> Result<SubmissionRecord, ValidationReport> {
        let form = self.validate(draft)?;
        SubmissionRecord::try_from(form)
    }

    /// Personal data alone, with issue paths relative to the personal-data object.
    pub fn validate_personal_data(
        &self,
        draft: &PersonalDataDraft,
    ) -> Result<PersonalData, ValidationReport> {
        let mut issues = IssueCollector::new();
        match self.personal_data(draft, &[], &mut issues) {
            Some(data) if issues.is_empty() => Ok(data),
            _ => Err(issues.into_report()),
        }
    }

    fn personal_data(
        &self,
        draft: &PersonalDataDraft,
        prefix: &[&str],
        issues: &mut IssueCollector,
    ) -> Option<PersonalData> {
        let first_name = issues.check(
            &join(prefix, "firstName"),
            fields::FIRST_NAME.apply(&draft.first_name),
        );
        let last_name = issues.check(
            &join(prefix, "lastName"),
            fields::LAST_NAME.apply(&draft.last_name),
        );
        let pesel = issues.check(
            &join(prefix, "pesel"),
            validate_pesel_choice(&draft.pesel, draft.without_pesel),
        );
        let phone = issues.check(
            &join(prefix, "phone"),
            PhoneNumber::parse(&draft.phone, self.default_calling_code),
        );
        let email = issues.check(&join(prefix, "email"), fields::EMAIL.apply(&draft.email));
        let address = address(&draft.address, &join(prefix, "address"), issues);

        Some(PersonalData {
            first_name: first_name?,
            last_name: last_name?,
            pesel: pesel?,
            without_pesel: draft.without_pesel,
            phone: phone?,
            email: email?,
            address: address?,
        })
    }
}

fn resolve_user_type(raw: Option<&str>, issues: &mut IssueCollector) -> Option<UserType> {
    match raw.map(str::trim) {
        None | Some("") => {
            issues.push(&["userType"], IssueKind::Required, messages::USER_TYPE_REQUIRED);
            None
        }
        Some(tag) => {
            let parsed = UserType::parse(tag);
            if parsed.is_none() {
                issues.push(
                    &["userType"],
                    IssueKind::InvalidUserType,
                    messages::USER_TYPE_INVALID,
                );
            }
            parsed
        }
    }
}

fn address(draft: &AddressDraft, prefix: &[&str], issues: &mut IssueCollector) -> Option<Address> {
    let street = issues.check(&join(prefix, "street"), fields::STREET.apply(&draft.street));
    let building_number = issues.check(
        &join(prefix, "buildingNumber"),
        fields::BUILDING_NUMBER.apply(&draft.building_number),
    );
    let apartment_number = issues.check(
        &join(prefix, "apartmentNumber"),
        fields::APARTMENT_NUMBER.apply_optional(&draft.apartment_number),
    );
    let city = issues.check(&join(prefix, "city"), fields::CITY.apply(&draft.city));
    let postal_code = issues.check(
        &join(prefix, "postalCode"),
        fields::POSTAL_CODE.apply(&draft.postal_code),
    );

    Some(Address {
        street: street?,
        building_number: building_number?,
        apartment_number: apartment_number?,
        city: city?,
        postal_code: postal_code?,
    })
}

fn consents(draft: &ConsentsDraft, prefix: &[&str], issues: &mut IssueCollector) -> Option<Consents> {
    let mut valid = true;
    for (key, given) in [("terms", draft.terms), ("privacyPolicy", draft.privacy_policy)] {
        if !given {
            issues.push(&join(prefix, key), IssueKind::Required, messages::CONSENT_REQUIRED);
            valid = false;
        }
    }

    valid.then_some(Consents {
        terms: draft.terms,
        privacy_policy: draft.privacy_policy,
        marketing: draft.marketing,
    })
}

/// Report every populated key the selected arm does not admit.
fn reject_foreign_keys(draft: &CompanyDataDraft, allowed: &[&str], issues: &mut IssueCollector) -> bool {
    let mut clean = true;
    for key in draft.populated_keys() {
        if !allowed.contains(&key.as_str()) {
            issues.push(
                &["companyData", key.as_str()],
                IssueKind::UnrecognizedKey,
                messages::COMPANY_DATA_NOT_ALLOWED,
            );
            clean = false;
        }
    }
    clean
}

const COMPANY_KEYS: [&str; 6] = ["name", "nip", "regon", "krs", "registrySignature", "address"];

fn company_data(
    user_type: UserType,
    draft: &CompanyDataDraft,
    issues: &mut IssueCollector,
) -> Option<CompanyData> {
    let prefix = ["companyData"];
    match user_type {
        UserType::None => {
            reject_foreign_keys(draft, &[], issues).then_some(CompanyData::None(EmptyCompanyData {}))
        }
        UserType::Consumer => reject_foreign_keys(draft, &[], issues)
            .then_some(CompanyData::Consumer(EmptyCompanyData {})),
        UserType::ConsumerVat => {
            let clean = reject_foreign_keys(draft, &["nip"], issues);
            let nip = issues.check(&join(&prefix, "nip"), Nip::parse(&draft.nip));
            let nip = nip.filter(|_| clean)?;
            Some(CompanyData::ConsumerVat(VatConsumerData { nip }))
        }
        UserType::Company => {
            let clean = reject_foreign_keys(draft, &COMPANY_KEYS, issues);
            let name = issues.check(&join(&prefix, "name"), fields::COMPANY_NAME.apply(&draft.name));
            let nip = issues.check(&join(&prefix, "nip"), Nip::parse(&draft.nip));
            let regon = issues.check(&join(&prefix, "regon"), Regon::parse(&draft.regon));
            let krs = if draft.krs.trim().is_empty() {
                Some(None)
            } else {
                issues.check(&join(&prefix, "krs"), Krs::parse(&draft.krs).map(Some))
            };
            let address = address(&draft.address, &join(&prefix, "address"), issues);
            let registry_signature = issues.check(
                &join(&prefix, "registrySignature"),
                fields::REGISTRY_SIGNATURE.apply(&draft.registry_signature),
            );

            if !clean {
                return None;
            }
            Some(CompanyData::Company(CompanyRecord {
                name: name?,
                nip: nip?,
                regon: regon?,
                krs: krs?,
                address: address?,
                registry_signature: registry_signature?,
            }))
        }
    }
}
