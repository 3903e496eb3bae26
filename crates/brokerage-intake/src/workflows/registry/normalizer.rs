use crate::workflows::intake::fields::normalize_postal_code;

const STREET_PREFIXES: [&str; 3] = ["ul. ", "ul ", "ul."];

pub(crate) fn collapse(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{a0}'], " ");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Registries prefix most streets with `ul.`; the form stores the bare name.
pub(crate) fn street(value: &str) -> String {
    let collapsed = collapse(value);
    for prefix in STREET_PREFIXES {
        if collapsed.len() > prefix.len()
            && collapsed.is_char_boundary(prefix.len())
            && collapsed[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return collapsed[prefix.len()..].trim_start().to_string();
        }
    }
    collapsed
}

pub(crate) fn postal_code(value: &str) -> String {
    normalize_postal_code(&collapse(value))
}

pub(crate) fn optional(value: Option<&str>) -> String {
    value.map(collapse).unwrap_or_default()
}
