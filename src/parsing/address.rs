//! Address normalization for participant comparison.
//!
//! Archives spell the same number many ways (`+1 (555) 123-4567`,
//! `5551234567`, `1-555-123-4567`). Grouping and owner detection compare
//! the normalized form instead.
//!
//! Only the North American convention of a leading country code `1` is
//! understood. Numbers from other regions keep their country code, and
//! non-numeric addresses such as e-mail gateways only lose punctuation.

/// Returns the canonical comparison key for `address`.
///
/// Strips whitespace, parentheses, `+` and `-`, then drops a leading `1`
/// when exactly ten digits follow it. Normalizing twice is a no-op.
///
/// # Example
///
/// ```
/// use smspack::parsing::normalize_address;
///
/// assert_eq!(normalize_address("1 (234) 567-8910"), "2345678910");
/// assert_eq!(normalize_address("+44 20 7946 0018"), "442079460018");
/// assert_eq!(normalize_address("jane@example.com"), "jane@example.com");
/// ```
pub fn normalize_address(address: &str) -> String {
    let stripped: String = address.chars().filter(|&c| !is_stripped(c)).collect();

    match stripped.strip_prefix('1') {
        Some(rest) if rest.len() == 10 && rest.bytes().all(|b| b.is_ascii_digit()) => {
            rest.to_string()
        }
        _ => stripped,
    }
}

fn is_stripped(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C' | '(' | ')' | '+' | '-'
    )
}
