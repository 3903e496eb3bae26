//! Bulk identifier checks over CSV exports (`kind,value[,reference]`), used
//! by back-office staff to audit client lists before migrating them.

mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::workflows::intake::identifiers::{IdentifierKind, ValidationResult};

#[derive(Debug)]
pub enum IdentifierBatchError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for IdentifierBatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierBatchError::Io(err) => write!(f, "failed to read identifier file: {}", err),
            IdentifierBatchError::Csv(err) => write!(f, "invalid identifier CSV data: {}", err),
        }
    }
}

impl std::error::Error for IdentifierBatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IdentifierBatchError::Io(err) => Some(err),
            IdentifierBatchError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for IdentifierBatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IdentifierBatchError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Result for a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    Checked {
        kind: IdentifierKind,
        result: ValidationResult,
    },
    UnknownKind {
        kind: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub value: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    pub fn is_valid(&self) -> bool {
        matches!(&self.outcome, BatchOutcome::Checked { result, .. } if result.is_valid)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub unknown_kind: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|entry| !entry.is_valid())
    }
}

pub struct IdentifierBatch;

impl IdentifierBatch {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BatchReport, IdentifierBatchError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<BatchReport, IdentifierBatchError> {
        let mut entries = Vec::new();
        let mut summary = BatchSummary::default();

        for row in parser::parse_rows(reader)? {
            summary.total += 1;
            let outcome = match IdentifierKind::parse(&row.kind) {
                Some(kind) => {
                    let result = kind.validate(&row.value);
                    if result.is_valid {
                        summary.valid += 1;
                    } else {
                        summary.invalid += 1;
                    }
                    BatchOutcome::Checked { kind, result }
                }
                None => {
                    summary.unknown_kind += 1;
                    BatchOutcome::UnknownKind { kind: row.kind }
                }
            };

            entries.push(BatchEntry {
                line: row.line,
                reference: row.reference,
                value: row.value,
                outcome,
            });
        }

        Ok(BatchReport { entries, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rows_are_checked_with_matching_validator() {
        let csv = "kind,value,reference\n\
nip,123-456-32-18,client-1\n\
PESEL,44051401358,client-2\n\
iban,PL61109010140000071219812874,client-3\n\
krs,0000123456,\n";
        let report = IdentifierBatch::from_reader(Cursor::new(csv)).expect("batch parses");

        assert_eq!(
            report.summary,
            BatchSummary {
                total: 4,
                valid: 2,
                invalid: 1,
                unknown_kind: 1
            }
        );
        assert_eq!(report.entries[0].line, 2);
        assert_eq!(report.entries[0].reference.as_deref(), Some("client-1"));
        assert!(report.entries[3].reference.is_none());
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn reference_column_is_optional() {
        let csv = "kind,value\nregon,123456785\n";
        let report = IdentifierBatch::from_reader(Cursor::new(csv)).expect("batch parses");
        assert_eq!(report.summary.valid, 1);
    }

    #[test]
    fn missing_kind_column_is_a_csv_error() {
        let csv = "value\n1234563218\n";
        assert!(matches!(
            IdentifierBatch::from_reader(Cursor::new(csv)),
            Err(IdentifierBatchError::Csv(_))
        ));
    }
}
