//! Polish user-facing validation messages.
//!
//! The engine only selects a key; the text lives here as read-only tables.

/// Messages for a free-text field validated by length and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMessages {
    pub required: &'static str,
    pub too_short: &'static str,
    pub too_long: &'static str,
    pub invalid_format: &'static str,
}

/// Messages for a checksum-bearing national identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierMessages {
    pub required: &'static str,
    pub too_short: &'static str,
    pub too_long: &'static str,
    pub invalid_length: &'static str,
    pub all_zeros: &'static str,
    pub invalid_checksum: &'static str,
}

/// Messages for the phone number classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneMessages {
    pub required: &'static str,
    pub not_a_number: &'static str,
    pub invalid_country_code: &'static str,
    pub too_short: &'static str,
    pub too_long: &'static str,
    pub invalid_length: &'static str,
}

pub const FIRST_NAME: FieldMessages = FieldMessages {
    required: "Imię jest wymagane",
    too_short: "Imię musi mieć co najmniej 2 znaki",
    too_long: "Imię może mieć maksymalnie 50 znaków",
    invalid_format: "Imię może zawierać tylko litery, spacje, apostrofy i myślniki",
};

pub const LAST_NAME: FieldMessages = FieldMessages {
    required: "Nazwisko jest wymagane",
    too_short: "Nazwisko musi mieć co najmniej 2 znaki",
    too_long: "Nazwisko może mieć maksymalnie 50 znaków",
    invalid_format: "Nazwisko może zawierać tylko litery, spacje, apostrofy i myślniki",
};

pub const STREET: FieldMessages = FieldMessages {
    required: "Ulica jest wymagana",
    too_short: "Nazwa ulicy musi mieć co najmniej 2 znaki",
    too_long: "Nazwa ulicy może mieć maksymalnie 100 znaków",
    invalid_format: "Nazwa ulicy zawiera niedozwolone znaki",
};

pub const BUILDING_NUMBER: FieldMessages = FieldMessages {
    required: "Numer budynku jest wymagany",
    too_short: "Numer budynku jest wymagany",
    too_long: "Numer budynku może mieć maksymalnie 10 znaków",
    invalid_format: "Nieprawidłowy numer budynku (np. 12, 12A, 12/3)",
};

pub const APARTMENT_NUMBER: FieldMessages = FieldMessages {
    required: "Numer lokalu jest wymagany",
    too_short: "Numer lokalu jest za krótki",
    too_long: "Numer lokalu może mieć maksymalnie 10 znaków",
    invalid_format: "Nieprawidłowy numer lokalu (np. 3, 3A)",
};

pub const CITY: FieldMessages = FieldMessages {
    required: "Miejscowość jest wymagana",
    too_short: "Nazwa miejscowości musi mieć co najmniej 2 znaki",
    too_long: "Nazwa miejscowości może mieć maksymalnie 50 znaków",
    invalid_format: "Nazwa miejscowości może zawierać tylko litery, spacje, kropki i myślniki",
};

pub const POSTAL_CODE: FieldMessages = FieldMessages {
    required: "Kod pocztowy jest wymagany",
    too_short: "Kod pocztowy musi mieć format 00-000",
    too_long: "Kod pocztowy musi mieć format 00-000",
    invalid_format: "Kod pocztowy musi mieć format 00-000",
};

pub const EMAIL: FieldMessages = FieldMessages {
    required: "Adres e-mail jest wymagany",
    too_short: "Adres e-mail jest za krótki",
    too_long: "Adres e-mail może mieć maksymalnie 100 znaków",
    invalid_format: "Nieprawidłowy adres e-mail",
};

pub const COMPANY_NAME: FieldMessages = FieldMessages {
    required: "Nazwa firmy jest wymagana",
    too_short: "Nazwa firmy musi mieć co najmniej 2 znaki",
    too_long: "Nazwa firmy może mieć maksymalnie 200 znaków",
    invalid_format: "Nazwa firmy zawiera niedozwolone znaki",
};

pub const REGISTRY_SIGNATURE: FieldMessages = FieldMessages {
    required: "Oznaczenie rejestru jest wymagane",
    too_short: "Oznaczenie rejestru musi mieć co najmniej 2 znaki",
    too_long: "Oznaczenie rejestru może mieć maksymalnie 100 znaków",
    invalid_format: "Oznaczenie rejestru zawiera niedozwolone znaki",
};

pub const NIP: IdentifierMessages = IdentifierMessages {
    required: "NIP jest wymagany",
    too_short: "NIP musi składać się z 10 cyfr",
    too_long: "NIP może składać się maksymalnie z 10 cyfr",
    invalid_length: "NIP musi składać się z 10 cyfr",
    all_zeros: "NIP nie może składać się z samych zer",
    invalid_checksum: "Nieprawidłowy NIP (błędna suma kontrolna)",
};

pub const PESEL: IdentifierMessages = IdentifierMessages {
    required: "PESEL jest wymagany",
    too_short: "PESEL musi składać się z 11 cyfr",
    too_long: "PESEL może składać się maksymalnie z 11 cyfr",
    invalid_length: "PESEL musi składać się z 11 cyfr",
    all_zeros: "PESEL nie może składać się z samych zer",
    invalid_checksum: "Nieprawidłowy PESEL (błędna suma kontrolna)",
};

pub const REGON: IdentifierMessages = IdentifierMessages {
    required: "REGON jest wymagany",
    too_short: "REGON musi składać się z 9 lub 14 cyfr",
    too_long: "REGON może składać się maksymalnie z 14 cyfr",
    invalid_length: "REGON musi składać się z 9 lub 14 cyfr",
    all_zeros: "REGON nie może składać się z samych zer",
    invalid_checksum: "Nieprawidłowy REGON",
};

pub const KRS: IdentifierMessages = IdentifierMessages {
    required: "Numer KRS jest wymagany",
    too_short: "Numer KRS musi składać się z 10 cyfr",
    too_long: "Numer KRS może składać się maksymalnie z 10 cyfr",
    invalid_length: "Numer KRS musi składać się z 10 cyfr",
    all_zeros: "Numer KRS nie może składać się z samych zer",
    invalid_checksum: "Nieprawidłowy numer KRS",
};

pub const PHONE: PhoneMessages = PhoneMessages {
    required: "Numer telefonu jest wymagany",
    not_a_number: "Numer telefonu może zawierać tylko cyfry i opcjonalny prefiks +",
    invalid_country_code: "Nieznany numer kierunkowy kraju",
    too_short: "Numer telefonu jest za krótki",
    too_long: "Numer telefonu jest za długi",
    invalid_length: "Nieprawidłowa długość numeru telefonu dla wybranego kraju",
};

pub const PEP_SELECTION_REQUIRED: &str = "Zaznacz odpowiedź TAK lub NIE";
pub const PEP_FIELD_REQUIRED: &str = "To pole jest wymagane";

pub const CONSENT_REQUIRED: &str = "Zgoda jest wymagana";

pub const USER_TYPE_REQUIRED: &str = "Wybierz typ klienta";
pub const USER_TYPE_INVALID: &str = "Nieprawidłowy typ klienta";
pub const COMPANY_DATA_NOT_ALLOWED: &str = "Dane firmy nie są dozwolone dla wybranego typu klienta";
