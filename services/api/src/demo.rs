use crate::checks::print_issues;
use crate::infra::{InMemoryNotifier, InMemorySubmissionRepository, StaticCompanyRegistry};
use brokerage_intake::error::AppError;
use brokerage_intake::workflows::intake::{
    validate_nip, validate_pesel, ConsentsDraft, FormDraft, FormSchema, IntakeService,
    IntakeServiceError, Nip, PepDeclarationsDraft, PepGroupDraft, PersonalDataDraft,
    SubmissionRepository,
};
use brokerage_intake::workflows::registry::CompanyRegistry;
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Calling code assumed for phone numbers without a `+` prefix
    #[arg(long, default_value_t = 48)]
    pub(crate) calling_code: u16,
    /// Skip the politically exposed client in the walkthrough
    #[arg(long)]
    pub(crate) skip_pep: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemorySubmissionRepository::default());
    let notifier = Arc::new(InMemoryNotifier::default());
    let service = IntakeService::new(
        FormSchema::new(args.calling_code),
        repository.clone(),
        notifier.clone(),
    );

    println!("Brokerage contract intake demo");
    println!("\nIdentifier checks");
    for (label, result) in [
        ("NIP 123-456-32-18", validate_nip("123-456-32-18")),
        ("NIP 0000000000", validate_nip("0000000000")),
        ("PESEL 44051401359", validate_pesel("44051401359")),
        ("PESEL abc", validate_pesel("abc")),
    ] {
        println!(
            "  {:<20} {}",
            label,
            result.error.as_deref().unwrap_or("valid")
        );
    }

    println!("\nIncomplete draft");
    let mut draft = sample_draft();
    draft.personal_data.pesel.clear();
    draft.consents.privacy_policy = false;
    let progress = service.progress(&draft);
    println!(
        "  Progress: {}/{} steps complete",
        progress.completed_steps, progress.total_steps
    );
    if let Err(report) = service.validate(&draft) {
        print_issues(&report);
    }

    println!("\nCompany client prefilled from the registry");
    let registry = StaticCompanyRegistry::with_sample_companies();
    let mut company = sample_draft();
    company.user_type = Some("company".to_string());
    match Nip::parse("1234563218").map(|nip| registry.lookup(&nip)) {
        Ok(Ok(Some(record))) => company.company_data = record.to_company_draft(),
        Ok(Ok(None)) => println!("  Registry returned no company"),
        Ok(Err(err)) => println!("  Registry unavailable: {}", err),
        Err(err) => println!("  Lookup skipped: {}", err),
    }
    submit(&service, &company);

    if !args.skip_pep {
        println!("\nPolitically exposed client");
        let mut pep = sample_draft();
        pep.pep_declarations.personal = group(
            true,
            &[("position", "Wojewoda"), ("institution", "Urząd Wojewódzki")],
        );
        submit(&service, &pep);
    }

    match repository.pending_review(10) {
        Ok(pending) => println!("\nAwaiting enhanced due diligence: {}", pending.len()),
        Err(err) => println!("\nReview queue unavailable: {}", err),
    }

    let events = notifier.events();
    if events.is_empty() {
        println!("Broker notifications: none dispatched");
    } else {
        println!("Broker notifications:");
        for event in events {
            println!("  - {} for {}", event.template, event.submission_id);
        }
    }

    Ok(())
}

fn submit(
    service: &IntakeService<InMemorySubmissionRepository, InMemoryNotifier>,
    draft: &FormDraft,
) {
    match service.submit(draft) {
        Ok(envelope) => {
            let view = envelope.status_view();
            println!(
                "  {} accepted at {} (status: {}, client type: {})",
                view.submission_id,
                view.received_at.format("%Y-%m-%d %H:%M:%S UTC"),
                view.status,
                view.user_type
            );
        }
        Err(IntakeServiceError::Validation(report)) => print_issues(&report),
        Err(err) => println!("  Submission failed: {}", err),
    }
}

fn group(flag: bool, data: &[(&str, &str)]) -> PepGroupDraft {
    PepGroupDraft {
        flag: Some(flag),
        data: data
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn sample_draft() -> FormDraft {
    let mut draft = FormDraft {
        user_type: Some("consumer".to_string()),
        personal_data: PersonalDataDraft {
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            pesel: "44051401359".to_string(),
            without_pesel: false,
            phone: "+48 600 700 800".to_string(),
            email: "jan.kowalski@example.pl".to_string(),
            ..PersonalDataDraft::default()
        },
        pep_declarations: PepDeclarationsDraft {
            personal: group(false, &[]),
            family: group(false, &[]),
            coworker: group(false, &[]),
        },
        company_data: Default::default(),
        consents: ConsentsDraft {
            terms: true,
            privacy_policy: true,
            marketing: false,
        },
    };
    draft.personal_data.address.street = "Marszałkowska".to_string();
    draft.personal_data.address.building_number = "12A".to_string();
    draft.personal_data.address.city = "Warszawa".to_string();
    draft.personal_data.address.postal_code = "00-950".to_string();
    draft
}
