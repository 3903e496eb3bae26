//! Consumption of company records looked up in the public registers
//! (GUS REGON, CEIDG and KRS). Fetching is done by an external client; this
//! module turns its output into a company draft the form can prefill.

mod normalizer;
pub mod router;

use serde::{Deserialize, Serialize};

use crate::workflows::intake::domain::{AddressDraft, CompanyDataDraft};
use crate::workflows::intake::identifiers::{IdentifierKind, Nip};

pub use router::registry_router;

/// Register a company record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrySource {
    Gus,
    Ceidg,
    Krs,
}

/// Company record as returned by a registry lookup, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCompany {
    pub source: RegistrySource,
    pub name: String,
    pub nip: String,
    pub regon: String,
    #[serde(default)]
    pub krs: Option<String>,
    pub street: String,
    pub building_number: String,
    #[serde(default)]
    pub apartment_number: Option<String>,
    pub city: String,
    pub postal_code: String,
}

impl RegistryCompany {
    /// Prefill shape for the company step; the form schema still validates it.
    pub fn to_company_draft(&self) -> CompanyDataDraft {
        CompanyDataDraft {
            name: normalizer::collapse(&self.name),
            nip: IdentifierKind::Nip.sanitize(&self.nip),
            regon: IdentifierKind::Regon.sanitize(&self.regon),
            krs: self
                .krs
                .as_deref()
                .map(|krs| IdentifierKind::Krs.sanitize(krs))
                .unwrap_or_default(),
            registry_signature: self.registry_signature(),
            address: AddressDraft {
                street: normalizer::street(&self.street),
                building_number: normalizer::collapse(&self.building_number),
                apartment_number: normalizer::optional(self.apartment_number.as_deref()),
                city: normalizer::collapse(&self.city),
                postal_code: normalizer::postal_code(&self.postal_code),
            },
            other: Default::default(),
        }
    }

    pub fn registry_signature(&self) -> String {
        match self.source {
            RegistrySource::Krs => match self.krs.as_deref() {
                Some(krs) => format!("KRS {}", IdentifierKind::Krs.sanitize(krs)),
                None => "KRS".to_string(),
            },
            RegistrySource::Ceidg => "CEIDG".to_string(),
            RegistrySource::Gus => {
                format!("GUS REGON {}", IdentifierKind::Regon.sanitize(&self.regon))
            }
        }
    }
}

/// Lookup seam for the registry client.
pub trait CompanyRegistry: Send + Sync {
    fn lookup(&self, nip: &Nip) -> Result<Option<RegistryCompany>, RegistryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("company registry unavailable: {0}")]
    Unavailable(String),
}
