use super::common::*;
use crate::workflows::intake::identifiers::{
    validate_krs, validate_nip, validate_pesel, validate_regon, IdentifierFailure, IdentifierKind,
};
use crate::workflows::intake::messages;

#[test]
fn sanitize_is_idempotent_for_every_kind() {
    let inputs = ["", "abc", "123-456-32-18", " 44 05 14 01 359 ", "12345678901234567890"];
    for kind in IdentifierKind::ALL {
        for raw in inputs {
            let once = kind.sanitize(raw);
            assert_eq!(kind.sanitize(&once), once, "{kind} on {raw:?}");
            assert!(once.len() <= kind.max_len());
        }
    }
}

#[test]
fn nip_accepts_valid_checksum_and_formatting() {
    let result = validate_nip(VALID_NIP);
    assert!(result.is_valid);
    assert_eq!(result.sanitized_value.as_deref(), Some(VALID_NIP));

    let formatted = validate_nip("123-456-32-18");
    assert!(formatted.is_valid);
    assert_eq!(formatted.sanitized_value.as_deref(), Some(VALID_NIP));
}

#[test]
fn nip_checksum_and_all_zeros_are_distinct_failures() {
    let checksum = validate_nip("1234563219");
    assert!(!checksum.is_valid);
    assert_eq!(checksum.error.as_deref(), Some(messages::NIP.invalid_checksum));

    let zeros = validate_nip("0000000000");
    assert!(!zeros.is_valid);
    assert_eq!(zeros.error.as_deref(), Some(messages::NIP.all_zeros));
    assert_ne!(zeros.error, checksum.error);
}

#[test]
fn pesel_last_digit_mutation_flips_validity() {
    for valid in [VALID_PESEL, "02070803628", "81020312342"] {
        assert!(validate_pesel(valid).is_valid, "{valid} should pass");

        let mut digits: Vec<u8> = valid.bytes().collect();
        let last = digits.len() - 1;
        digits[last] = b'0' + ((digits[last] - b'0' + 1) % 10);
        let mutated = String::from_utf8(digits).expect("ascii digits");
        let result = validate_pesel(&mutated);
        assert!(!result.is_valid, "{mutated} should fail");
        assert_eq!(result.error.as_deref(), Some(messages::PESEL.invalid_checksum));
    }
}

#[test]
fn non_numeric_input_runs_the_length_cascade() {
    for kind in IdentifierKind::ALL {
        let letters = kind.check("abc").unwrap_err();
        assert_eq!(letters.failure, IdentifierFailure::TooShort, "{kind}");
        assert_eq!(letters.sanitized.as_deref(), Some(""), "{kind}");

        let result = kind.validate("abc");
        assert!(!result.is_valid, "{kind}");
        assert_eq!(result.sanitized_value.as_deref(), Some(""), "{kind}");
    }

    let short = IdentifierKind::Nip.check("123").unwrap_err();
    assert_eq!(short.failure, IdentifierFailure::TooShort);

    let blank = validate_pesel("   ");
    assert_eq!(blank.error.as_deref(), Some(messages::PESEL.required));
    assert_eq!(blank.sanitized_value, None);
}

#[test]
fn overlong_input_reports_too_long_with_truncated_value() {
    let result = validate_nip("12345632181");
    assert!(!result.is_valid);
    assert_eq!(result.error.as_deref(), Some(messages::NIP.too_long));
    assert_eq!(result.sanitized_value.as_deref(), Some(VALID_NIP));
}

#[test]
fn regon_accepts_nine_or_fourteen_digits_only() {
    assert!(validate_regon(VALID_REGON).is_valid);
    assert!(validate_regon("12345678512347").is_valid);

    let middle = IdentifierKind::Regon.check("1234567890").unwrap_err();
    assert_eq!(middle.failure, IdentifierFailure::InvalidLength);
    assert_eq!(
        IdentifierKind::Regon.check("12345678").unwrap_err().failure,
        IdentifierFailure::TooShort
    );
}

#[test]
fn krs_keeps_leading_zeros() {
    let result = validate_krs(VALID_KRS);
    assert!(result.is_valid);
    assert_eq!(result.sanitized_value.as_deref(), Some(VALID_KRS));
    assert!(!validate_krs("123456").is_valid);
}
