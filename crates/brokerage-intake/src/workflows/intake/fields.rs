use std::sync::LazyLock;

use regex::Regex;

use super::issues::{FieldFailure, IssueKind};
use super::messages::{self, FieldMessages};

static PERSON_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{L}[\p{L}' \-]*$").expect("person name pattern compiles")
});
static STREET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\d][\p{L}\d .,'/\-]*$").expect("street pattern compiles")
});
static BUILDING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+[A-Za-z]?(/\d+[A-Za-z]?)?$").expect("building number pattern compiles")
});
static APARTMENT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[A-Za-z]?$").expect("apartment pattern compiles"));
static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}[\p{L} .\-]*$").expect("city pattern compiles"));
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{3}$").expect("postal code pattern compiles"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Ordered text rule: trim, length bounds, then an optional pattern.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub min: usize,
    pub max: usize,
    pub pattern: Option<&'static LazyLock<Regex>>,
    pub messages: &'static FieldMessages,
}

pub static FIRST_NAME: TextRule = TextRule {
    min: 2,
    max: 50,
    pattern: Some(&PERSON_NAME_RE),
    messages: &messages::FIRST_NAME,
};

pub static LAST_NAME: TextRule = TextRule {
    min: 2,
    max: 50,
    pattern: Some(&PERSON_NAME_RE),
    messages: &messages::LAST_NAME,
};

pub static STREET: TextRule = TextRule {
    min: 2,
    max: 100,
    pattern: Some(&STREET_RE),
    messages: &messages::STREET,
};

pub static BUILDING_NUMBER: TextRule = TextRule {
    min: 1,
    max: 10,
    pattern: Some(&BUILDING_NUMBER_RE),
    messages: &messages::BUILDING_NUMBER,
};

pub static APARTMENT_NUMBER: TextRule = TextRule {
    min: 1,
    max: 10,
    pattern: Some(&APARTMENT_NUMBER_RE),
    messages: &messages::APARTMENT_NUMBER,
};

pub static CITY: TextRule = TextRule {
    min: 2,
    max: 50,
    pattern: Some(&CITY_RE),
    messages: &messages::CITY,
};

pub static POSTAL_CODE: TextRule = TextRule {
    min: 6,
    max: 6,
    pattern: Some(&POSTAL_CODE_RE),
    messages: &messages::POSTAL_CODE,
};

pub static EMAIL: TextRule = TextRule {
    min: 5,
    max: 100,
    pattern: Some(&EMAIL_RE),
    messages: &messages::EMAIL,
};

pub static COMPANY_NAME: TextRule = TextRule {
    min: 2,
    max: 200,
    pattern: None,
    messages: &messages::COMPANY_NAME,
};

pub static REGISTRY_SIGNATURE: TextRule = TextRule {
    min: 2,
    max: 100,
    pattern: None,
    messages: &messages::REGISTRY_SIGNATURE,
};

impl TextRule {
    /// Validate a required field, returning the trimmed value.
    pub fn apply(&self, raw: &str) -> Result<String, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(self.fail(TextFailure::Required));
        }

        let length = trimmed.chars().count();
        if length < self.min {
            return Err(self.fail(TextFailure::TooShort));
        }
        if length > self.max {
            return Err(self.fail(TextFailure::TooLong));
        }

        if let Some(pattern) = self.pattern {
            if !pattern.is_match(trimmed) {
                return Err(self.fail(TextFailure::InvalidFormat));
            }
        }

        Ok(trimmed.to_string())
    }

    /// Blank input is accepted as absent; anything else must pass [`TextRule::apply`].
    pub fn apply_optional(&self, raw: &str) -> Result<Option<String>, FieldError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        self.apply(raw).map(Some)
    }

    fn fail(&self, failure: TextFailure) -> FieldError {
        FieldError {
            failure,
            messages: self.messages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFailure {
    Required,
    TooShort,
    TooLong,
    InvalidFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub struct FieldError {
    pub failure: TextFailure,
    messages: &'static FieldMessages,
}

impl FieldFailure for FieldError {
    fn kind(&self) -> IssueKind {
        match self.failure {
            TextFailure::Required => IssueKind::Required,
            TextFailure::TooShort => IssueKind::TooShort,
            TextFailure::TooLong => IssueKind::TooLong,
            TextFailure::InvalidFormat => IssueKind::InvalidFormat,
        }
    }

    fn message(&self) -> &'static str {
        match self.failure {
            TextFailure::Required => self.messages.required,
            TextFailure::TooShort => self.messages.too_short,
            TextFailure::TooLong => self.messages.too_long,
            TextFailure::InvalidFormat => self.messages.invalid_format,
        }
    }
}

/// Rewrite a bare five-digit postal code (`00950`) into the `00-950` form.
pub fn normalize_postal_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 5 && trimmed.chars().all(|c| c.is_ascii_digit() || c == '-' || c == ' ') {
        format!("{}-{}", &digits[..2], &digits[2..])
    } else {
        trimmed.to_string()
    }
}
