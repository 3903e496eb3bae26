use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::identifiers::{Krs, Nip, Pesel, Regon};
use super::issues::{IssueKind, ValidationReport};
use super::messages;
use super::pep::{PepDeclarations, PepDeclarationsDraft};
use super::phone::PhoneNumber;

/// Discriminator selecting which company-data shape is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserType {
    None,
    Company,
    ConsumerVat,
    Consumer,
}

impl UserType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim() {
            "none" => Some(Self::None),
            "company" => Some(Self::Company),
            "consumer-vat" => Some(Self::ConsumerVat),
            "consumer" => Some(Self::Consumer),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            UserType::None => "none",
            UserType::Company => "company",
            UserType::ConsumerVat => "consumer-vat",
            UserType::Consumer => "consumer",
        }
    }

    /// Whether the form shows the company-data step for this client type.
    pub const fn has_company_step(self) -> bool {
        matches!(self, UserType::Company | UserType::ConsumerVat)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Drafts: loose shapes mirroring client form state. Text defaults to "".
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDraft {
    pub user_type: Option<String>,
    pub personal_data: PersonalDataDraft,
    pub pep_declarations: PepDeclarationsDraft,
    pub company_data: CompanyDataDraft,
    pub consents: ConsentsDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDraft {
    pub street: String,
    pub building_number: String,
    pub apartment_number: String,
    pub city: String,
    pub postal_code: String,
}

impl AddressDraft {
    pub fn is_blank(&self) -> bool {
        [
            &self.street,
            &self.building_number,
            &self.apartment_number,
            &self.city,
            &self.postal_code,
        ]
        .iter()
        .all(|value| value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDataDraft {
    pub first_name: String,
    pub last_name: String,
    pub pesel: String,
    pub without_pesel: bool,
    pub phone: String,
    pub email: String,
    pub address: AddressDraft,
}

/// Company fields as held by the form; unknown keys are kept so strict arms can reject them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyDataDraft {
    pub name: String,
    pub nip: String,
    pub regon: String,
    pub krs: String,
    pub registry_signature: String,
    pub address: AddressDraft,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl CompanyDataDraft {
    /// Keys carrying data; blank strings and nulls count as absent.
    pub fn populated_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = [
            ("name", &self.name),
            ("nip", &self.nip),
            ("regon", &self.regon),
            ("krs", &self.krs),
            ("registrySignature", &self.registry_signature),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, _)| key.to_string())
        .collect();

        if !self.address.is_blank() {
            keys.push("address".to_string());
        }

        keys.extend(
            self.other
                .iter()
                .filter(|(_, value)| is_populated(value))
                .map(|(key, _)| key.clone()),
        );
        keys
    }
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentsDraft {
    pub terms: bool,
    pub privacy_policy: bool,
    pub marketing: bool,
}

// ---------------------------------------------------------------------------
// Validated shapes.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub building_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_number: Option<String>,
    pub city: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub first_name: String,
    pub last_name: String,
    pub pesel: Option<Pesel>,
    pub without_pesel: bool,
    pub phone: PhoneNumber,
    pub email: String,
    pub address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consents {
    pub terms: bool,
    pub privacy_policy: bool,
    pub marketing: bool,
}

/// Fields common to every client type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedFormData {
    pub personal_data: PersonalData,
    pub pep_declarations: PepDeclarations,
    pub consents: Consents,
}

/// Full registry-backed company record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub name: String,
    pub nip: Nip,
    pub regon: Regon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub krs: Option<Krs>,
    pub address: Address,
    pub registry_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatConsumerData {
    pub nip: Nip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyCompanyData {}

/// Company data tagged by the client type that admits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "userType", content = "companyData", rename_all = "kebab-case")]
pub enum CompanyData {
    None(EmptyCompanyData),
    Company(CompanyRecord),
    ConsumerVat(VatConsumerData),
    Consumer(EmptyCompanyData),
}

impl CompanyData {
    pub fn user_type(&self) -> UserType {
        match self {
            CompanyData::None(_) => UserType::None,
            CompanyData::Company(_) => UserType::Company,
            CompanyData::ConsumerVat(_) => UserType::ConsumerVat,
            CompanyData::Consumer(_) => UserType::Consumer,
        }
    }
}

/// Draft that passed every rule, with hidden PEP details already scrubbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedForm {
    #[serde(flatten)]
    pub shared: SharedFormData,
    #[serde(flatten)]
    pub company: CompanyData,
}

impl ValidatedForm {
    pub fn user_type(&self) -> UserType {
        self.company.user_type()
    }
}

/// Validated form whose client type is eligible for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionRecord(ValidatedForm);

impl SubmissionRecord {
    pub fn form(&self) -> &ValidatedForm {
        &self.0
    }

    pub fn user_type(&self) -> UserType {
        self.0.user_type()
    }

    pub fn is_politically_exposed(&self) -> bool {
        self.0.shared.pep_declarations.is_politically_exposed()
    }

    pub fn into_inner(self) -> ValidatedForm {
        self.0
    }
}

impl TryFrom<ValidatedForm> for SubmissionRecord {
    type Error = ValidationReport;

    fn try_from(form: ValidatedForm) -> Result<Self, Self::Error> {
        match form.company {
            CompanyData::None(_) => Err(ValidationReport::single(
                &["userType"],
                IssueKind::InvalidUserType,
                messages::USER_TYPE_REQUIRED,
            )),
            CompanyData::Company(_) | CompanyData::ConsumerVat(_) | CompanyData::Consumer(_) => {
                Ok(Self(form))
            }
        }
    }
}
