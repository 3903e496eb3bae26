//! Phone number rule with length classification per country calling code.

use std::fmt;

use serde::{Serialize, Serializer};

use super::issues::{FieldFailure, IssueKind};
use super::messages;

pub const DEFAULT_CALLING_CODE: u16 = 48;

const MAX_DIGITS: usize = 17;
const SEPARATORS: [char; 5] = [' ', '-', '.', '(', ')'];

/// Possible national significant number lengths per ITU calling code.
/// Codes are prefix-free and sorted, so lookups can binary search.
const CALLING_CODES: &[(u16, &[usize])] = &[
    (1, &[10]),
    (7, &[10]),
    (20, &[8, 9, 10]),
    (27, &[9]),
    (30, &[10]),
    (31, &[9]),
    (32, &[8, 9]),
    (33, &[9]),
    (34, &[9]),
    (36, &[8, 9]),
    (39, &[6, 7, 8, 9, 10, 11]),
    (40, &[9]),
    (41, &[9]),
    (43, &[4, 5, 6, 7, 8, 9, 10, 11, 12, 13]),
    (44, &[7, 9, 10]),
    (45, &[8]),
    (46, &[7, 8, 9, 10]),
    (47, &[5, 8]),
    (48, &[9]),
    (49, &[5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
    (51, &[8, 9]),
    (52, &[10]),
    (53, &[6, 7, 8]),
    (54, &[10, 11]),
    (55, &[10, 11]),
    (56, &[9]),
    (57, &[10]),
    (58, &[10]),
    (60, &[8, 9, 10]),
    (61, &[9]),
    (62, &[7, 8, 9, 10, 11, 12]),
    (63, &[8, 9, 10]),
    (64, &[8, 9, 10]),
    (65, &[8]),
    (66, &[8, 9]),
    (81, &[9, 10]),
    (82, &[8, 9, 10, 11]),
    (84, &[9, 10]),
    (86, &[7, 8, 9, 10, 11, 12]),
    (90, &[10]),
    (91, &[10]),
    (92, &[9, 10]),
    (93, &[9]),
    (94, &[9]),
    (95, &[8, 9, 10]),
    (98, &[10]),
    (211, &[9]),
    (212, &[9]),
    (213, &[8, 9]),
    (216, &[8]),
    (218, &[9]),
    (220, &[7]),
    (221, &[9]),
    (222, &[8]),
    (223, &[8]),
    (224, &[8, 9]),
    (225, &[10]),
    (226, &[8]),
    (227, &[8]),
    (228, &[8]),
    (229, &[8, 10]),
    (230, &[7, 8]),
    (231, &[7, 8, 9]),
    (232, &[8]),
    (233, &[9]),
    (234, &[7, 8, 9, 10]),
    (235, &[8]),
    (236, &[8]),
    (237, &[8, 9]),
    (238, &[7]),
    (239, &[7]),
    (240, &[9]),
    (241, &[7, 8]),
    (242, &[9]),
    (243, &[7, 9]),
    (244, &[9]),
    (245, &[7, 9]),
    (246, &[7]),
    (247, &[5]),
    (248, &[7]),
    (249, &[9]),
    (250, &[9]),
    (251, &[9]),
    (252, &[6, 7, 8, 9]),
    (253, &[8]),
    (254, &[7, 8, 9, 10]),
    (255, &[9]),
    (256, &[9]),
    (257, &[8]),
    (258, &[8, 9]),
    (260, &[9]),
    (261, &[9]),
    (262, &[9]),
    (263, &[5, 6, 7, 8, 9, 10]),
    (264, &[8, 9, 10]),
    (265, &[7, 9]),
    (266, &[8]),
    (267, &[7, 8]),
    (268, &[8]),
    (269, &[7]),
    (290, &[4, 5]),
    (291, &[7]),
    (297, &[7]),
    (298, &[6]),
    (299, &[6]),
    (350, &[8]),
    (351, &[9]),
    (352, &[4, 5, 6, 7, 8, 9, 10, 11]),
    (353, &[7, 8, 9]),
    (354, &[7, 9]),
    (355, &[6, 7, 8, 9]),
    (356, &[8]),
    (357, &[8]),
    (358, &[5, 6, 7, 8, 9, 10, 11, 12]),
    (359, &[6, 7, 8, 9]),
    (370, &[8]),
    (371, &[8]),
    (372, &[7, 8]),
    (373, &[8]),
    (374, &[8]),
    (375, &[9, 10]),
    (376, &[6, 8, 9]),
    (377, &[8, 9]),
    (378, &[6, 7, 8, 9, 10]),
    (380, &[9]),
    (381, &[6, 7, 8, 9, 10, 11, 12]),
    (382, &[8]),
    (383, &[8, 9]),
    (385, &[6, 7, 8, 9]),
    (386, &[8]),
    (387, &[8, 9]),
    (389, &[8]),
    (420, &[9]),
    (421, &[6, 7, 8, 9]),
    (423, &[7, 9]),
    (500, &[5]),
    (501, &[7]),
    (502, &[8]),
    (503, &[7, 8]),
    (504, &[8]),
    (505, &[8]),
    (506, &[8]),
    (507, &[7, 8]),
    (508, &[6]),
    (509, &[8]),
    (590, &[9]),
    (591, &[8]),
    (592, &[7]),
    (593, &[8, 9]),
    (594, &[9]),
    (595, &[6, 7, 8, 9]),
    (596, &[9]),
    (597, &[6, 7]),
    (598, &[8]),
    (599, &[7, 8]),
    (670, &[7, 8]),
    (672, &[6]),
    (673, &[7]),
    (674, &[7]),
    (675, &[7, 8]),
    (676, &[5, 7]),
    (677, &[5, 7]),
    (678, &[5, 7]),
    (679, &[7]),
    (680, &[7]),
    (681, &[6]),
    (682, &[5]),
    (683, &[4, 7]),
    (685, &[5, 6, 7]),
    (686, &[5, 8]),
    (687, &[6]),
    (688, &[5, 6]),
    (689, &[8]),
    (690, &[4, 5, 6, 7]),
    (691, &[7]),
    (692, &[7]),
    (850, &[8, 9, 10]),
    (852, &[8]),
    (853, &[8]),
    (855, &[8, 9]),
    (856, &[8, 9, 10]),
    (880, &[8, 9, 10]),
    (886, &[8, 9]),
    (960, &[7]),
    (961, &[7, 8]),
    (962, &[8, 9]),
    (963, &[8, 9]),
    (964, &[8, 9, 10]),
    (965, &[7, 8]),
    (966, &[9]),
    (967, &[7, 8, 9]),
    (968, &[8]),
    (970, &[8, 9]),
    (971, &[8, 9]),
    (972, &[8, 9]),
    (973, &[8]),
    (974, &[8]),
    (975, &[7, 8]),
    (976, &[8]),
    (977, &[8, 9, 10]),
    (992, &[9]),
    (993, &[8]),
    (994, &[9]),
    (995, &[9]),
    (996, &[9]),
    (998, &[9]),
];

fn lengths_for(calling_code: u16) -> Option<&'static [usize]> {
    CALLING_CODES
        .binary_search_by_key(&calling_code, |(code, _)| *code)
        .ok()
        .map(|index| CALLING_CODES[index].1)
}

pub fn is_known_calling_code(calling_code: u16) -> bool {
    lengths_for(calling_code).is_some()
}

/// Validated phone number, rendered in E.164 form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    calling_code: u16,
    national: String,
}

impl PhoneNumber {
    /// Parse a human-entered number; bare national numbers use `default_calling_code`.
    pub fn parse(raw: &str, default_calling_code: u16) -> Result<Self, PhoneError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Required);
        }

        let compact: String = trimmed.chars().filter(|c| !SEPARATORS.contains(c)).collect();
        let (international, digits) = if let Some(rest) = compact.strip_prefix('+') {
            (true, rest)
        } else if let Some(rest) = compact.strip_prefix("00") {
            (true, rest)
        } else {
            (false, compact.as_str())
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NotANumber);
        }
        if digits.len() > MAX_DIGITS {
            return Err(PhoneError::TooLong);
        }

        let (calling_code, national) = if international {
            split_calling_code(digits).ok_or(PhoneError::InvalidCountryCode)?
        } else {
            (default_calling_code, digits)
        };

        let lengths = lengths_for(calling_code).ok_or(PhoneError::InvalidCountryCode)?;
        let length = national.len();
        let shortest = lengths.iter().copied().min().unwrap_or(0);
        let longest = lengths.iter().copied().max().unwrap_or(0);

        if length < shortest {
            return Err(PhoneError::TooShort);
        }
        if length > longest {
            return Err(PhoneError::TooLong);
        }
        if !lengths.contains(&length) {
            return Err(PhoneError::InvalidLength);
        }

        Ok(Self {
            calling_code,
            national: national.to_string(),
        })
    }

    pub fn calling_code(&self) -> u16 {
        self.calling_code
    }

    pub fn national_number(&self) -> &str {
        &self.national
    }

    pub fn e164(&self) -> String {
        format!("+{}{}", self.calling_code, self.national)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}{}", self.calling_code, self.national)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.e164())
    }
}

/// Calling codes are prefix-free, so the first match by length is the only match.
fn split_calling_code(digits: &str) -> Option<(u16, &str)> {
    (1..=3)
        .filter(|width| digits.len() > *width)
        .find_map(|width| {
            let code: u16 = digits[..width].parse().ok()?;
            is_known_calling_code(code).then(|| (code, &digits[width..]))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number is required")]
    Required,
    #[error("phone number contains characters other than digits")]
    NotANumber,
    #[error("unknown country calling code")]
    InvalidCountryCode,
    #[error("phone number is too short")]
    TooShort,
    #[error("phone number is too long")]
    TooLong,
    #[error("phone number length is not valid for the country")]
    InvalidLength,
}

impl FieldFailure for PhoneError {
    fn kind(&self) -> IssueKind {
        match self {
            PhoneError::Required => IssueKind::Required,
            PhoneError::NotANumber => IssueKind::NotANumber,
            PhoneError::InvalidCountryCode => IssueKind::InvalidCountryCode,
            PhoneError::TooShort => IssueKind::TooShort,
            PhoneError::TooLong => IssueKind::TooLong,
            PhoneError::InvalidLength => IssueKind::InvalidLength,
        }
    }

    fn message(&self) -> &'static str {
        let table = &messages::PHONE;
        match self {
            PhoneError::Required => table.required,
            PhoneError::NotANumber => table.not_a_number,
            PhoneError::InvalidCountryCode => table.invalid_country_code,
            PhoneError::TooShort => table.too_short,
            PhoneError::TooLong => table.too_long,
            PhoneError::InvalidLength => table.invalid_length,
        }
    }
}
