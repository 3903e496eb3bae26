//! Polish national identifiers: NIP, PESEL, REGON and KRS.
//!
//! Every validator sanitizes the raw input (digits only, truncated to the
//! identifier's maximum length) and then runs the same ordered cascade:
//! required, too short, too long, the NIP all-zeros policy and finally the
//! weighted checksum. REGON and KRS stop after the length checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::issues::{FieldFailure, IssueKind};
use super::messages::{self, IdentifierMessages};

const NIP_LENGTH: usize = 10;
const PESEL_LENGTH: usize = 11;
const REGON_SHORT_LENGTH: usize = 9;
const REGON_LONG_LENGTH: usize = 14;
const KRS_LENGTH: usize = 10;

const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];
const PESEL_WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

/// Identifier families understood by the intake engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Nip,
    Pesel,
    Regon,
    Krs,
}

impl IdentifierKind {
    pub const ALL: [IdentifierKind; 4] = [Self::Nip, Self::Pesel, Self::Regon, Self::Krs];

    /// Resolve a case-insensitive tag such as `"nip"` or `"REGON"`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "nip" => Some(Self::Nip),
            "pesel" => Some(Self::Pesel),
            "regon" => Some(Self::Regon),
            "krs" => Some(Self::Krs),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            IdentifierKind::Nip => "NIP",
            IdentifierKind::Pesel => "PESEL",
            IdentifierKind::Regon => "REGON",
            IdentifierKind::Krs => "KRS",
        }
    }

    pub const fn max_len(self) -> usize {
        match self {
            IdentifierKind::Nip => NIP_LENGTH,
            IdentifierKind::Pesel => PESEL_LENGTH,
            IdentifierKind::Regon => REGON_LONG_LENGTH,
            IdentifierKind::Krs => KRS_LENGTH,
        }
    }

    const fn min_len(self) -> usize {
        match self {
            IdentifierKind::Regon => REGON_SHORT_LENGTH,
            other => other.max_len(),
        }
    }

    pub const fn messages(self) -> &'static IdentifierMessages {
        match self {
            IdentifierKind::Nip => &messages::NIP,
            IdentifierKind::Pesel => &messages::PESEL,
            IdentifierKind::Regon => &messages::REGON,
            IdentifierKind::Krs => &messages::KRS,
        }
    }

    /// Strip every non-digit character and truncate to the maximum length.
    pub fn sanitize(self, raw: &str) -> String {
        raw.chars()
            .filter(char::is_ascii_digit)
            .take(self.max_len())
            .collect()
    }

    /// Run the full cascade, returning the sanitized digits on success.
    pub fn check(self, raw: &str) -> Result<String, IdentifierError> {
        if raw.trim().is_empty() {
            return Err(IdentifierError::new(self, IdentifierFailure::Required, None));
        }

        let digit_count = raw.chars().filter(char::is_ascii_digit).count();
        let sanitized = self.sanitize(raw);
        let fail = |failure| Err(IdentifierError::new(self, failure, Some(sanitized.clone())));

        if digit_count < self.min_len() {
            return fail(IdentifierFailure::TooShort);
        }
        if digit_count > self.max_len() {
            return fail(IdentifierFailure::TooLong);
        }

        match self {
            IdentifierKind::Nip => {
                if sanitized.bytes().all(|digit| digit == b'0') {
                    return fail(IdentifierFailure::AllZeros);
                }
                if !nip_checksum_matches(&sanitized) {
                    return fail(IdentifierFailure::InvalidChecksum);
                }
            }
            IdentifierKind::Pesel => {
                if !pesel_checksum_matches(&sanitized) {
                    return fail(IdentifierFailure::InvalidChecksum);
                }
            }
            IdentifierKind::Regon => {
                if digit_count != REGON_SHORT_LENGTH && digit_count != REGON_LONG_LENGTH {
                    return fail(IdentifierFailure::InvalidLength);
                }
            }
            IdentifierKind::Krs => {}
        }

        Ok(sanitized)
    }

    /// UI-facing result; never fails.
    pub fn validate(self, raw: &str) -> ValidationResult {
        match self.check(raw) {
            Ok(sanitized) => ValidationResult {
                is_valid: true,
                error: None,
                sanitized_value: Some(sanitized),
            },
            Err(error) => ValidationResult {
                is_valid: false,
                error: Some(error.message().to_string()),
                sanitized_value: error.sanitized,
            },
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single identifier validation, shaped for form feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized_value: Option<String>,
}

pub fn validate_nip(raw: &str) -> ValidationResult {
    IdentifierKind::Nip.validate(raw)
}

pub fn validate_pesel(raw: &str) -> ValidationResult {
    IdentifierKind::Pesel.validate(raw)
}

pub fn validate_regon(raw: &str) -> ValidationResult {
    IdentifierKind::Regon.validate(raw)
}

pub fn validate_krs(raw: &str) -> ValidationResult {
    IdentifierKind::Krs.validate(raw)
}

/// Step of the cascade at which an identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierFailure {
    Required,
    TooShort,
    TooLong,
    InvalidLength,
    AllZeros,
    InvalidChecksum,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{identifier}: {}", self.message())]
pub struct IdentifierError {
    pub identifier: IdentifierKind,
    pub failure: IdentifierFailure,
    pub sanitized: Option<String>,
}

impl IdentifierError {
    fn new(identifier: IdentifierKind, failure: IdentifierFailure, sanitized: Option<String>) -> Self {
        Self {
            identifier,
            failure,
            sanitized,
        }
    }
}

impl FieldFailure for IdentifierError {
    fn kind(&self) -> IssueKind {
        match self.failure {
            IdentifierFailure::Required => IssueKind::Required,
            IdentifierFailure::TooShort => IssueKind::TooShort,
            IdentifierFailure::TooLong => IssueKind::TooLong,
            IdentifierFailure::InvalidLength => IssueKind::InvalidLength,
            IdentifierFailure::AllZeros => IssueKind::AllZeros,
            IdentifierFailure::InvalidChecksum => IssueKind::InvalidChecksum,
        }
    }

    fn message(&self) -> &'static str {
        let table = self.identifier.messages();
        match self.failure {
            IdentifierFailure::Required => table.required,
            IdentifierFailure::TooShort => table.too_short,
            IdentifierFailure::TooLong => table.too_long,
            IdentifierFailure::InvalidLength => table.invalid_length,
            IdentifierFailure::AllZeros => table.all_zeros,
            IdentifierFailure::InvalidChecksum => table.invalid_checksum,
        }
    }
}

fn digits_of(value: &str) -> impl Iterator<Item = u32> + '_ {
    value.chars().filter_map(|c| c.to_digit(10))
}

/// `sum(d_i * w_i) % 11` must equal the tenth digit; a remainder of 10 never matches.
fn nip_checksum_matches(digits: &str) -> bool {
    let values: Vec<u32> = digits_of(digits).collect();
    if values.len() != NIP_LENGTH {
        return false;
    }

    let sum: u32 = values
        .iter()
        .zip(NIP_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    let remainder = sum % 11;

    remainder != 10 && remainder == values[NIP_LENGTH - 1]
}

fn pesel_checksum_matches(digits: &str) -> bool {
    let values: Vec<u32> = digits_of(digits).collect();
    if values.len() != PESEL_LENGTH {
        return false;
    }

    let sum: u32 = values
        .iter()
        .zip(PESEL_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    let expected = (10 - sum % 10) % 10;

    expected == values[PESEL_LENGTH - 1]
}

macro_rules! identifier_newtype {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
                $kind.check(raw).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier_newtype!(
    /// Tax identification number (10 digits, checksum verified).
    Nip,
    IdentifierKind::Nip
);
identifier_newtype!(
    /// Personal identification number (11 digits, checksum verified).
    Pesel,
    IdentifierKind::Pesel
);
identifier_newtype!(
    /// Statistical business number, 9 or 14 digits.
    Regon,
    IdentifierKind::Regon
);
identifier_newtype!(
    /// National Court Register number, 10 digits with leading zeros kept.
    Krs,
    IdentifierKind::Krs
);
