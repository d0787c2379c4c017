// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! ISBN-10 and ISBN-13 (International Standard Book Number) validation.

/// Separators allowed between ISBN groups: space, hyphen, dot,
/// U+2010 HYPHEN and U+2011 NON-BREAKING HYPHEN.
const SEPARATORS: &[char] = &[' ', '-', '.', '\u{2010}', '\u{2011}'];

fn normalize(value: &str) -> Vec<char> {
    value.chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

/// Check an ISBN of either length.
pub fn is_valid_isbn(value: &str) -> bool {
    let isbn = normalize(value);
    match isbn.len() {
        10 => check_isbn10(&isbn),
        13 => check_isbn13(&isbn),
        _ => false,
    }
}

/// Check an ISBN-10 such as `0-471-95869-7`.
pub fn is_valid_isbn10(value: &str) -> bool {
    check_isbn10(&normalize(value))
}

/// Check an ISBN-13 such as `978-0-471-95869-7`.
pub fn is_valid_isbn13(value: &str) -> bool {
    check_isbn13(&normalize(value))
}

fn check_isbn10(isbn: &[char]) -> bool {
    if isbn.len() != 10 {
        return false;
    }

    let mut sum = 0;
    for (i, c) in isbn[..9].iter().enumerate() {
        match c.to_digit(10) {
            Some(digit) => sum += digit * (10 - i as u32),
            None => return false,
        }
    }

    let check = match isbn[9] {
        'X' | 'x' => 10,
        c => match c.to_digit(10) {
            Some(digit) => digit,
            None => return false,
        },
    };

    (sum + check) % 11 == 0
}

fn check_isbn13(isbn: &[char]) -> bool {
    if isbn.len() != 13 {
        return false;
    }

    let digits: Option<Vec<u32>> = isbn.iter().map(|c| c.to_digit(10)).collect();
    let digits = match digits {
        Some(digits) => digits,
        None => return false,
    };

    let sum: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();

    (10 - sum % 10) % 10 == digits[12]
}
