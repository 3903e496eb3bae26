//! Politically Exposed Person declarations.
//!
//! Three independent groups (personal, family, coworker) each carry a yes/no
//! flag and a fixed set of detail fields. Details are only validated when the
//! flag is `true`; a `false` group is scrubbed before submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::issues::{IssueCollector, IssueKind, ValidationReport};
use super::messages;

/// Detail field configured for a PEP group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PepFieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

const PERSONAL_FIELDS: &[PepFieldSpec] = &[
    PepFieldSpec {
        key: "position",
        label: "Zajmowane stanowisko",
        required: true,
    },
    PepFieldSpec {
        key: "institution",
        label: "Nazwa instytucji",
        required: true,
    },
    PepFieldSpec {
        key: "tenure",
        label: "Okres pełnienia funkcji",
        required: false,
    },
];

const FAMILY_FIELDS: &[PepFieldSpec] = &[
    PepFieldSpec {
        key: "fullName",
        label: "Imię i nazwisko członka rodziny",
        required: true,
    },
    PepFieldSpec {
        key: "relationship",
        label: "Stopień pokrewieństwa",
        required: true,
    },
    PepFieldSpec {
        key: "position",
        label: "Zajmowane stanowisko",
        required: true,
    },
];

const COWORKER_FIELDS: &[PepFieldSpec] = &[
    PepFieldSpec {
        key: "fullName",
        label: "Imię i nazwisko współpracownika",
        required: true,
    },
    PepFieldSpec {
        key: "relationship",
        label: "Rodzaj powiązania",
        required: true,
    },
    PepFieldSpec {
        key: "position",
        label: "Zajmowane stanowisko",
        required: true,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PepGroupKind {
    Personal,
    Family,
    Coworker,
}

impl PepGroupKind {
    pub const ALL: [PepGroupKind; 3] = [Self::Personal, Self::Family, Self::Coworker];

    pub const fn key(self) -> &'static str {
        match self {
            PepGroupKind::Personal => "personal",
            PepGroupKind::Family => "family",
            PepGroupKind::Coworker => "coworker",
        }
    }

    pub const fn fields(self) -> &'static [PepFieldSpec] {
        match self {
            PepGroupKind::Personal => PERSONAL_FIELDS,
            PepGroupKind::Family => FAMILY_FIELDS,
            PepGroupKind::Coworker => COWORKER_FIELDS,
        }
    }
}

/// One group as it sits in client form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PepGroupDraft {
    pub flag: Option<bool>,
    pub data: BTreeMap<String, String>,
}

impl PepGroupDraft {
    pub fn answered(&self) -> bool {
        self.flag.is_some()
    }

    /// Required fields left blank; empty unless the flag is `true`.
    pub fn missing_fields(&self, kind: PepGroupKind) -> Vec<&'static str> {
        if self.flag != Some(true) {
            return Vec::new();
        }

        kind.fields()
            .iter()
            .filter(|field| field.required && self.value(field.key).is_empty())
            .map(|field| field.key)
            .collect()
    }

    /// Mirrors the validation rule; drives progress indicators only.
    pub fn is_complete(&self, kind: PepGroupKind) -> bool {
        match self.flag {
            None => false,
            Some(false) => true,
            Some(true) => self.missing_fields(kind).is_empty(),
        }
    }

    fn value(&self, key: &str) -> &str {
        self.data.get(key).map(|value| value.trim()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PepDeclarationsDraft {
    pub personal: PepGroupDraft,
    pub family: PepGroupDraft,
    pub coworker: PepGroupDraft,
}

impl PepDeclarationsDraft {
    pub fn group(&self, kind: PepGroupKind) -> &PepGroupDraft {
        match kind {
            PepGroupKind::Personal => &self.personal,
            PepGroupKind::Family => &self.family,
            PepGroupKind::Coworker => &self.coworker,
        }
    }

    pub fn summary(&self) -> PepSummary {
        let mut summary = PepSummary::default();
        for kind in PepGroupKind::ALL {
            let group = self.group(kind);
            if group.answered() {
                summary.answered += 1;
            }
            if group.is_complete(kind) {
                summary.complete += 1;
            } else {
                summary.incomplete_groups.push(kind);
            }
            if group.flag == Some(true) {
                summary.politically_exposed = true;
            }
        }
        summary
    }
}

/// Aggregated state of the three groups for progress and compliance routing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PepSummary {
    pub answered: usize,
    pub complete: usize,
    pub politically_exposed: bool,
    pub incomplete_groups: Vec<PepGroupKind>,
}

impl PepSummary {
    pub fn all_complete(&self) -> bool {
        self.incomplete_groups.is_empty()
    }
}

/// Resolved group; `data` holds exactly the configured keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PepGroup {
    pub flag: bool,
    pub data: BTreeMap<String, String>,
}

impl PepGroup {
    fn scrub(&mut self) {
        if !self.flag {
            for value in self.data.values_mut() {
                value.clear();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PepDeclarations {
    pub personal: PepGroup,
    pub family: PepGroup,
    pub coworker: PepGroup,
}

impl PepDeclarations {
    pub fn group(&self, kind: PepGroupKind) -> &PepGroup {
        match kind {
            PepGroupKind::Personal => &self.personal,
            PepGroupKind::Family => &self.family,
            PepGroupKind::Coworker => &self.coworker,
        }
    }

    /// Blank every detail of groups answered "no". Idempotent.
    pub fn scrub_hidden(&mut self) {
        self.personal.scrub();
        self.family.scrub();
        self.coworker.scrub();
    }

    pub fn is_politically_exposed(&self) -> bool {
        PepGroupKind::ALL
            .iter()
            .any(|kind| self.group(*kind).flag)
    }
}

/// Validate all three groups with issue paths relative to the declarations object.
pub fn validate_pep_declarations(
    draft: &PepDeclarationsDraft,
) -> Result<PepDeclarations, ValidationReport> {
    let mut issues = IssueCollector::new();
    match validate_declarations(draft, &[], &mut issues) {
        Some(declarations) if issues.is_empty() => Ok(declarations),
        _ => Err(issues.into_report()),
    }
}

pub(crate) fn validate_declarations(
    draft: &PepDeclarationsDraft,
    prefix: &[&str],
    issues: &mut IssueCollector,
) -> Option<PepDeclarations> {
    let personal = validate_group(PepGroupKind::Personal, &draft.personal, prefix, issues);
    let family = validate_group(PepGroupKind::Family, &draft.family, prefix, issues);
    let coworker = validate_group(PepGroupKind::Coworker, &draft.coworker, prefix, issues);

    Some(PepDeclarations {
        personal: personal?,
        family: family?,
        coworker: coworker?,
    })
}

fn validate_group(
    kind: PepGroupKind,
    draft: &PepGroupDraft,
    prefix: &[&str],
    issues: &mut IssueCollector,
) -> Option<PepGroup> {
    let mut path: Vec<&str> = prefix.to_vec();
    path.push(kind.key());

    let Some(flag) = draft.flag else {
        path.push("flag");
        issues.push(
            &path,
            IssueKind::SelectionRequired,
            messages::PEP_SELECTION_REQUIRED,
        );
        return None;
    };

    let mut valid = true;
    if flag {
        path.push("data");
        for key in draft.missing_fields(kind) {
            path.push(key);
            issues.push(&path, IssueKind::Required, messages::PEP_FIELD_REQUIRED);
            path.pop();
            valid = false;
        }
    }

    let data = kind
        .fields()
        .iter()
        .map(|field| (field.key.to_string(), draft.value(field.key).to_string()))
        .collect();

    valid.then_some(PepGroup { flag, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(flag: Option<bool>, data: &[(&str, &str)]) -> PepGroupDraft {
        PepGroupDraft {
            flag,
            data: data
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    #[test]
    fn completeness_follows_flag_and_required_fields() {
        let kind = PepGroupKind::Personal;
        assert!(!group(None, &[]).is_complete(kind));
        assert!(group(Some(false), &[("position", "")]).is_complete(kind));
        assert!(!group(Some(true), &[("position", "Wojewoda")]).is_complete(kind));
        // optional tenure may stay empty
        assert!(group(
            Some(true),
            &[("position", "Wojewoda"), ("institution", "Urząd Wojewódzki")]
        )
        .is_complete(kind));
    }

    #[test]
    fn whitespace_only_detail_counts_as_missing() {
        let draft = group(Some(true), &[("fullName", "   "), ("relationship", "brat")]);
        assert_eq!(
            draft.missing_fields(PepGroupKind::Family),
            vec!["fullName", "position"]
        );
    }

    #[test]
    fn summary_flags_exposure_and_incomplete_groups() {
        let draft = PepDeclarationsDraft {
            personal: group(Some(false), &[]),
            family: group(Some(true), &[("fullName", "Jan Nowak")]),
            coworker: PepGroupDraft::default(),
        };

        let summary = draft.summary();
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.complete, 1);
        assert!(summary.politically_exposed);
        assert_eq!(
            summary.incomplete_groups,
            vec![PepGroupKind::Family, PepGroupKind::Coworker]
        );
    }

    #[test]
    fn scrub_is_idempotent_and_keeps_true_groups() {
        let mut declarations = PepDeclarations {
            personal: PepGroup {
                flag: false,
                data: BTreeMap::from([("position".to_string(), "Poseł".to_string())]),
            },
            family: PepGroup {
                flag: true,
                data: BTreeMap::from([("fullName".to_string(), "Anna Nowak".to_string())]),
            },
            coworker: PepGroup {
                flag: false,
                data: BTreeMap::new(),
            },
        };

        declarations.scrub_hidden();
        let once = declarations.clone();
        declarations.scrub_hidden();

        assert_eq!(declarations, once);
        assert_eq!(declarations.personal.data["position"], "");
        assert_eq!(declarations.family.data["fullName"], "Anna Nowak");
    }
}
