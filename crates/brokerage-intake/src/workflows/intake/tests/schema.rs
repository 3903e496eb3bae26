use serde_json::json;

use super::common::*;
use crate::workflows::intake::domain::{CompanyData, FormDraft, PersonalDataDraft, UserType};
use crate::workflows::intake::issues::IssueKind;
use crate::workflows::intake::messages;
use crate::workflows::intake::{validate_pesel_choice, FormSchema};

fn schema() -> FormSchema {
    FormSchema::default()
}

#[test]
fn consumer_draft_validates() {
    let form = schema().validate(&consumer_draft()).expect("consumer form valid");
    assert_eq!(form.user_type(), UserType::Consumer);
    assert_eq!(form.shared.personal_data.phone.e164(), "+48600700800");
    assert_eq!(
        form.shared.personal_data.pesel.as_ref().map(|pesel| pesel.as_str()),
        Some(VALID_PESEL)
    );
}

#[test]
fn company_draft_validates_into_company_record() {
    let form = schema().validate(&company_draft()).expect("company form valid");
    let CompanyData::Company(record) = &form.company else {
        panic!("expected company arm, got {:?}", form.company);
    };
    assert_eq!(record.nip.as_str(), VALID_NIP);
    assert_eq!(record.krs.as_ref().map(|krs| krs.as_str()), Some(VALID_KRS));
}

#[test]
fn pesel_may_be_skipped_only_when_declared_absent() {
    assert_eq!(validate_pesel_choice("", true), Ok(None));

    let mut draft = PersonalDataDraft {
        pesel: String::new(),
        without_pesel: true,
        ..personal_data()
    };
    let data = schema()
        .validate_personal_data(&draft)
        .expect("without pesel is valid");
    assert!(data.pesel.is_none());
    assert!(data.without_pesel);

    draft.without_pesel = false;
    let report = schema()
        .validate_personal_data(&draft)
        .expect_err("pesel required");
    let issue = report.issue_at(&["pesel"]).expect("issue at pesel");
    assert_eq!(issue.kind, IssueKind::Required);
    assert_eq!(issue.message, messages::PESEL.required);
}

#[test]
fn issues_accumulate_across_fields_one_per_field() {
    let mut draft = consumer_draft();
    draft.personal_data.first_name = "J".to_string();
    draft.personal_data.email = "not-an-email".to_string();
    draft.personal_data.address.postal_code = "00950".to_string();
    draft.consents.terms = false;

    let report = schema().validate(&draft).expect_err("several issues");
    assert_eq!(report.len(), 4);
    assert_eq!(
        report.issue_at(&["personalData", "firstName"]).map(|i| i.kind),
        Some(IssueKind::TooShort)
    );
    assert_eq!(
        report.issue_at(&["personalData", "email"]).map(|i| i.kind),
        Some(IssueKind::InvalidFormat)
    );
    assert_eq!(
        report
            .issue_at(&["personalData", "address", "postalCode"])
            .map(|i| i.kind),
        Some(IssueKind::TooShort)
    );
    assert_eq!(
        report.issue_at(&["consents", "terms"]).map(|i| i.message.as_str()),
        Some(messages::CONSENT_REQUIRED)
    );
}

#[test]
fn consumer_with_company_fields_is_rejected() {
    let mut draft = consumer_draft();
    draft.company_data.nip = VALID_NIP.to_string();
    draft.company_data.name = "Firma".to_string();

    let report = schema().validate(&draft).expect_err("company data not allowed");
    for key in ["nip", "name"] {
        let issue = report
            .issue_at(&["companyData", key])
            .expect("issue per populated key");
        assert_eq!(issue.kind, IssueKind::UnrecognizedKey);
    }
}

#[test]
fn blank_company_fields_are_tolerated_for_consumers() {
    let mut draft = consumer_draft();
    draft.company_data.name = "   ".to_string();
    assert!(schema().validate(&draft).is_ok());
}

#[test]
fn consumer_vat_requires_only_a_valid_nip() {
    let mut draft = consumer_draft();
    draft.user_type = Some("consumer-vat".to_string());
    let report = schema().validate(&draft).expect_err("nip missing");
    assert_eq!(
        report.issue_at(&["companyData", "nip"]).map(|i| i.kind),
        Some(IssueKind::Required)
    );

    draft.company_data.nip = VALID_NIP.to_string();
    let form = schema().validate(&draft).expect("nip supplied");
    assert!(matches!(form.company, CompanyData::ConsumerVat(_)));

    draft.company_data.regon = VALID_REGON.to_string();
    let report = schema().validate(&draft).expect_err("regon not allowed");
    assert!(report.issue_at(&["companyData", "regon"]).is_some());
}

#[test]
fn company_reports_nested_address_paths_and_optional_krs() {
    let mut draft = company_draft();
    draft.company_data.krs.clear();
    draft.company_data.address.city = String::new();

    let report = schema().validate(&draft).expect_err("city missing");
    assert_eq!(report.len(), 1);
    assert!(report
        .issue_at(&["companyData", "address", "city"])
        .is_some());

    draft.company_data.address.city = "Kraków".to_string();
    let form = schema().validate(&draft).expect("krs optional");
    let CompanyData::Company(record) = form.company else {
        panic!("expected company arm");
    };
    assert!(record.krs.is_none());
}

#[test]
fn company_arm_rejects_unknown_keys_from_json() {
    let mut value = draft_json(&company_draft());
    value["companyData"]["shareCapital"] = json!("5000");
    let draft: FormDraft = serde_json::from_value(value).expect("draft parses");

    let report = schema().validate(&draft).expect_err("unknown key");
    assert_eq!(
        report.issue_at(&["companyData", "shareCapital"]).map(|i| i.kind),
        Some(IssueKind::UnrecognizedKey)
    );
}

#[test]
fn user_type_must_be_present_and_known() {
    let mut draft = consumer_draft();
    draft.user_type = None;
    let report = schema().validate(&draft).expect_err("missing type");
    let issue = report.issue_at(&["userType"]).expect("user type issue");
    assert_eq!(issue.kind, IssueKind::Required);
    assert_eq!(issue.message, messages::USER_TYPE_REQUIRED);

    draft.user_type = Some("partnership".to_string());
    let report = schema().validate(&draft).expect_err("unknown type");
    assert_eq!(
        report.issue_at(&["userType"]).map(|i| i.kind),
        Some(IssueKind::InvalidUserType)
    );
}

#[test]
fn none_type_validates_but_cannot_be_submitted() {
    let mut draft = consumer_draft();
    draft.user_type = Some("none".to_string());

    let form = schema().validate(&draft).expect("none arm validates");
    assert_eq!(form.user_type(), UserType::None);

    let report = schema()
        .prepare_submission(&draft)
        .expect_err("none is not submittable");
    assert_eq!(
        report.issue_at(&["userType"]).map(|i| i.kind),
        Some(IssueKind::InvalidUserType)
    );
}

#[test]
fn validated_form_serializes_with_discriminator() {
    let form = schema().validate(&company_draft()).expect("valid");
    let value = serde_json::to_value(&form).expect("serializes");
    assert_eq!(value["userType"], "company");
    assert_eq!(value["companyData"]["nip"], VALID_NIP);
    assert_eq!(value["personalData"]["phone"], "+48600700800");
    assert_eq!(value["consents"]["privacyPolicy"], true);
}

#[test]
fn configured_calling_code_applies_to_bare_numbers() {
    let mut draft = consumer_draft();
    draft.personal_data.phone = "30 1234 5678".to_string();

    assert!(FormSchema::default().validate(&draft).is_err());
    let form = FormSchema::new(49).validate(&draft).expect("german number");
    assert_eq!(form.shared.personal_data.phone.e164(), "+493012345678");
}
