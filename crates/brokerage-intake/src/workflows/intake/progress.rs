use serde::Serialize;

use super::domain::{FormDraft, UserType};
use super::issues::ValidationReport;
use super::pep::PepSummary;
use super::schema::FormSchema;

/// Form steps in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormStep {
    ClientType,
    PersonalData,
    CompanyData,
    PepDeclarations,
    Consents,
}

impl FormStep {
    pub const ALL: [FormStep; 5] = [
        Self::ClientType,
        Self::PersonalData,
        Self::CompanyData,
        Self::PepDeclarations,
        Self::Consents,
    ];

    /// Root of the issue paths that belong to this step.
    pub const fn root(self) -> &'static str {
        match self {
            FormStep::ClientType => "userType",
            FormStep::PersonalData => "personalData",
            FormStep::CompanyData => "companyData",
            FormStep::PepDeclarations => "pepDeclarations",
            FormStep::Consents => "consents",
        }
    }

    fn is_visible(self, user_type: Option<UserType>) -> bool {
        match self {
            FormStep::CompanyData => user_type.is_some_and(UserType::has_company_step),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub step: FormStep,
    pub complete: bool,
    pub issue_count: usize,
}

/// Progress indicator state; informational only and never gates submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormProgress {
    pub steps: Vec<StepProgress>,
    pub pep: PepSummary,
    pub completed_steps: usize,
    pub total_steps: usize,
    pub ready_to_submit: bool,
}

pub fn form_progress(schema: &FormSchema, draft: &FormDraft) -> FormProgress {
    let report = match schema.prepare_submission(draft) {
        Ok(_) => ValidationReport { issues: Vec::new() },
        Err(report) => report,
    };
    let user_type = draft.user_type.as_deref().and_then(UserType::parse);
    let pep = draft.pep_declarations.summary();

    let steps: Vec<StepProgress> = FormStep::ALL
        .into_iter()
        .filter(|step| step.is_visible(user_type))
        .map(|step| {
            let issue_count = report
                .issues
                .iter()
                .filter(|issue| issue.starts_with(&[step.root()]))
                .count();
            let complete = match step {
                FormStep::PepDeclarations => issue_count == 0 && pep.all_complete(),
                _ => issue_count == 0,
            };
            StepProgress {
                step,
                complete,
                issue_count,
            }
        })
        .collect();

    let completed_steps = steps.iter().filter(|step| step.complete).count();
    let total_steps = steps.len();

    FormProgress {
        ready_to_submit: report.is_empty(),
        steps,
        pep,
        completed_steps,
        total_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_step_only_shown_for_business_clients() {
        let schema = FormSchema::default();
        let mut draft = FormDraft {
            user_type: Some("consumer".to_string()),
            ..FormDraft::default()
        };
        let progress = form_progress(&schema, &draft);
        assert_eq!(progress.total_steps, 4);
        assert!(progress
            .steps
            .iter()
            .all(|step| step.step != FormStep::CompanyData));

        draft.user_type = Some("consumer-vat".to_string());
        let progress = form_progress(&schema, &draft);
        assert_eq!(progress.total_steps, 5);
    }

    #[test]
    fn empty_draft_is_not_ready() {
        let progress = form_progress(&FormSchema::default(), &FormDraft::default());
        assert!(!progress.ready_to_submit);
        assert_eq!(progress.completed_steps, 0);
        assert_eq!(progress.pep.answered, 0);
    }
}
