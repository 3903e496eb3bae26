use serde::{Deserialize, Serialize};

/// Failure taxonomy shared by every rule in the intake engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Required,
    TooShort,
    TooLong,
    InvalidLength,
    InvalidFormat,
    InvalidChecksum,
    AllZeros,
    InvalidCountryCode,
    NotANumber,
    SelectionRequired,
    UnrecognizedKey,
    InvalidUserType,
}

/// Single field-level problem reported at a nested path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: Vec<String>,
    pub message: String,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn new(path: &[&str], kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|segment| segment.to_string()).collect(),
            message: message.into(),
            kind,
        }
    }

    /// Dotted rendering of the path (`personalData.pesel`) for logs and CLI output.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.path.len() >= prefix.len()
            && self
                .path
                .iter()
                .zip(prefix)
                .all(|(segment, expected)| segment == expected)
    }
}

/// Implemented by the per-field error types so they can be reported uniformly.
pub trait FieldFailure {
    fn kind(&self) -> IssueKind;
    fn message(&self) -> &'static str;
}

/// Accumulates issues across fields while each field stops at its first failure.
#[derive(Debug, Default)]
pub(crate) struct IssueCollector {
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the failure of a single field and hand back its value on success.
    pub(crate) fn check<T, E: FieldFailure>(
        &mut self,
        path: &[&str],
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(failure) => {
                self.issues
                    .push(ValidationIssue::new(path, failure.kind(), failure.message()));
                None
            }
        }
    }

    pub(crate) fn push(&mut self, path: &[&str], kind: IssueKind, message: &str) {
        self.issues.push(ValidationIssue::new(path, kind, message));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub(crate) fn into_report(self) -> ValidationReport {
        ValidationReport {
            issues: self.issues,
        }
    }
}

/// Every issue found in a draft; returned instead of the validated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("form has {} validation issue(s)", .issues.len())]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn single(path: &[&str], kind: IssueKind, message: &str) -> Self {
        Self {
            issues: vec![ValidationIssue::new(path, kind, message)],
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issue_at(&self, path: &[&str]) -> Option<&ValidationIssue> {
        self.issues
            .iter()
            .find(|issue| issue.path.iter().map(String::as_str).eq(path.iter().copied()))
    }

    pub fn has_issues_under(&self, prefix: &[&str]) -> bool {
        self.issues.iter().any(|issue| issue.starts_with(prefix))
    }
}
