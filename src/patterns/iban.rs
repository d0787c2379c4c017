// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! IBAN (International Bank Account Number) validation.
//!
//! Implements the ISO 7064 mod-97-10 check over the re-arranged account
//! number, after verifying the length registered for the country prefix.

/// Registered IBAN lengths per ISO 3166 country code.
const COUNTRY_LENGTHS: &[(&str, usize)] = &[
    ("AD", 24), ("AE", 23), ("AL", 28), ("AO", 25), ("AT", 20), ("AZ", 28),
    ("BA", 20), ("BE", 16), ("BF", 27), ("BG", 22), ("BH", 22), ("BI", 27),
    ("BJ", 28), ("BR", 29), ("BY", 28), ("CH", 21), ("CI", 28), ("CM", 27),
    ("CR", 22), ("CV", 25), ("CY", 28), ("CZ", 24), ("DE", 22), ("DJ", 27),
    ("DK", 18), ("DO", 28), ("DZ", 24), ("EE", 20), ("EG", 29), ("ES", 24),
    ("FI", 18), ("FK", 18), ("FO", 18), ("FR", 27), ("GB", 22), ("GE", 22),
    ("GI", 23), ("GL", 18), ("GR", 27), ("GT", 28), ("HN", 28), ("HR", 21),
    ("HU", 28), ("IE", 22), ("IL", 23), ("IQ", 23), ("IR", 26), ("IS", 26),
    ("IT", 27), ("JO", 30), ("KW", 30), ("KZ", 20), ("LB", 28), ("LC", 32),
    ("LI", 21), ("LT", 20), ("LU", 20), ("LV", 21), ("LY", 25), ("MC", 27),
    ("MD", 24), ("ME", 22), ("MG", 27), ("MK", 19), ("ML", 28), ("MN", 20),
    ("MR", 27), ("MT", 31), ("MU", 30), ("MZ", 25), ("NI", 28), ("NL", 18),
    ("NO", 15), ("OM", 23), ("PK", 24), ("PL", 28), ("PS", 29), ("PT", 25),
    ("QA", 29), ("RO", 24), ("RS", 22), ("RU", 33), ("SA", 24), ("SC", 31),
    ("SD", 18), ("SE", 24), ("SI", 19), ("SK", 24), ("SM", 27), ("SN", 28),
    ("SO", 23), ("ST", 25), ("SV", 28), ("TL", 23), ("TN", 24), ("TR", 26),
    ("UA", 29), ("VA", 22), ("VG", 24), ("XK", 20), ("YE", 30),
];

/// Registered IBAN length for a two-letter country code.
pub fn iban_length(country: &str) -> Option<usize> {
    COUNTRY_LENGTHS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country))
        .map(|(_, length)| *length)
}

/// Check an IBAN such as `GB82 WEST 1234 5698 7654 32`.
pub fn is_valid_iban(value: &str) -> bool {
    let iban: String = value
        .chars()
        .filter(|c| *c != ' ')
        .collect::<String>()
        .to_ascii_uppercase();

    if !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    let expected = match iban.get(..2).and_then(iban_length) {
        Some(length) => length,
        None => return false,
    };
    if iban.len() != expected {
        return false;
    }

    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    mod97(&rearranged) == Some(1)
}

/// Remainder of the numeric expansion of `value` modulo 97.
///
/// Letters expand to two digits (`A` = 10 .. `Z` = 35). The remainder is
/// accumulated digit by digit so the number never has to be materialised.
fn mod97(value: &str) -> Option<u32> {
    let mut digits = value.chars().flat_map(expand_char);

    let mut checksum = digits.next()??;
    for digit in digits {
        checksum = (checksum * 10 + digit?) % 97;
    }

    Some(checksum)
}

fn expand_char(c: char) -> Vec<Option<u32>> {
    match c {
        '0'..='9' => vec![c.to_digit(10)],
        'A'..='Z' => {
            let value = c as u32 - 'A' as u32 + 10;
            vec![Some(value / 10), Some(value % 10)]
        }
        _ => vec![None],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ibans() {
        assert!(is_valid_iban("GB82WEST12345698765432"));
        assert!(is_valid_iban("GB82 WEST 1234 5698 7654 32"));
        assert!(is_valid_iban("gb82west12345698765432"));
        assert!(is_valid_iban("DE89370400440532013000"));
        assert!(is_valid_iban("NL91ABNA0417164300"));
        assert!(is_valid_iban("DK5000400440116243"));
    }

    #[test]
    fn test_single_character_changes() {
        assert!(!is_valid_iban("GB82WEST12345698765433"));
        assert!(!is_valid_iban("GB82WEST12345698765412"));
        assert!(!is_valid_iban("GB82VEST12345698765432"));
        assert!(!is_valid_iban("GB83WEST12345698765432"));
    }

    #[test]
    fn test_unknown_country() {
        assert!(!is_valid_iban("ZZ82WEST12345698765432"));
        assert!(!is_valid_iban("1282WEST12345698765432"));
    }

    #[test]
    fn test_wrong_length() {
        assert!(!is_valid_iban("GB82WEST1234569876543"));
        assert!(!is_valid_iban("GB82WEST123456987654321"));
        assert!(!is_valid_iban(""));
        assert!(!is_valid_iban("G"));
    }

    #[test]
    fn test_rejects_symbols() {
        assert!(!is_valid_iban("GB82-WEST-1234-5698-7654-32"));
        assert!(!is_valid_iban("GB82WEST1234569876543!"));
    }

    #[test]
    fn test_iban_length_lookup() {
        assert_eq!(iban_length("GB"), Some(22));
        assert_eq!(iban_length("no"), Some(15));
        assert_eq!(iban_length("ZZ"), None);
    }

    #[test]
    fn test_mod97() {
        assert_eq!(mod97("97"), Some(0));
        assert_eq!(mod97("98"), Some(1));
        assert_eq!(mod97("A"), Some(10));
        assert_eq!(mod97("a"), None);
    }
}
