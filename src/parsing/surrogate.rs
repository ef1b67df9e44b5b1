//! Repair of split surrogate pairs in SMS Backup & Restore exports.
//!
//! The exporter writes characters outside the Basic Multilingual Plane
//! (most emoji) as two adjacent decimal character references, one per
//! UTF-16 code unit: 😀 becomes `&#55357;&#56832;`. Each reference alone
//! names a surrogate code point, which XML forbids, so a conforming parser
//! rejects the document. The repair runs over the complete raw text before
//! any XML parsing.
//!
//! Only the exact shape `&#DDDDD;&#DDDDD;` (five digits each) is touched.
//! Anything else, including a lone surrogate reference, passes through and
//! will still fail later in the XML parser.

use std::borrow::Cow;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Code points accepted as the first half of a pair.
///
/// The range spans the low-surrogate block too: a pair whose first
/// reference falls anywhere in `D800..=DFFF` is combined.
pub const HIGH_SURROGATES: RangeInclusive<u32> = 0xD800..=0xDFFF;

static SURROGATE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d{5});&#(\d{5});").expect("valid surrogate pair pattern"));

/// Replaces escaped surrogate pairs in `input` with the characters they encode.
///
/// Returns the input unchanged (borrowed) when nothing matched.
///
/// The second reference is not checked against the low-surrogate range; the
/// combined value is used as computed. If it does not name a Unicode scalar
/// value the match is left as written.
///
/// # Example
///
/// ```
/// use smspack::parsing::fix_surrogate_pairs;
///
/// assert_eq!(fix_surrogate_pairs("hi &#55357;&#56832;"), "hi \u{1F600}");
/// assert_eq!(fix_surrogate_pairs("&#65000;&#56832;"), "&#65000;&#56832;");
/// ```
pub fn fix_surrogate_pairs(input: &str) -> Cow<'_, str> {
    SURROGATE_PAIR.replace_all(input, |caps: &Captures<'_>| {
        combine(&caps[1], &caps[2])
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    })
}

fn combine(high: &str, low: &str) -> Option<char> {
    let high: u32 = high.parse().ok()?;
    if !HIGH_SURROGATES.contains(&high) {
        return None;
    }
    let low = i64::from(low.parse::<u32>().ok()?);
    let code_point = ((i64::from(high) - 0xD800) << 10) + (low - 0xDC00) + 0x10000;
    u32::try_from(code_point).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repairs_grinning_face() {
        assert_eq!(fix_surrogate_pairs("&#55357;&#56832;"), "\u{1F600}");
    }

    #[test]
    fn test_repairs_inside_attribute() {
        let xml = r#"<sms body="cats &#55357;&#56865; are great" />"#;
        assert_eq!(
            fix_surrogate_pairs(xml),
            "<sms body=\"cats \u{1F621} are great\" />"
        );
    }

    #[test]
    fn test_repairs_multiple_pairs() {
        let fixed = fix_surrogate_pairs("&#55357;&#56832;&#55357;&#56832;");
        assert_eq!(fixed, "\u{1F600}\u{1F600}");
    }

    #[test]
    fn test_leaves_non_surrogate_first_half() {
        let input = "&#65000;&#56832;";
        assert_eq!(fix_surrogate_pairs(input), input);
    }

    #[test]
    fn test_matches_do_not_overlap() {
        // the first pair is rejected as a whole; its second half is not
        // offered again as the start of a new pair
        let input = "&#65000;&#55357;&#56832;";
        assert_eq!(fix_surrogate_pairs(input), input);

        let fixed = fix_surrogate_pairs("&#55357;&#56832;&#56832;");
        assert_eq!(fixed, "\u{1F600}&#56832;");
    }

    #[test]
    fn test_leaves_other_digit_counts() {
        let input = "&#169;&#174; &#9731;&#9731; &#128512;";
        assert!(matches!(fix_surrogate_pairs(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_does_not_validate_low_half() {
        // 0xD83D followed by a value below the low-surrogate block still
        // combines into a valid scalar value.
        let fixed = fix_surrogate_pairs("&#55357;&#55296;");
        let expected = char::from_u32(((0xD83D - 0xD800) << 10) + 0x10000 - 0x400).unwrap();
        assert_eq!(fixed, expected.to_string());
    }

    #[test]
    fn test_unrepresentable_result_left_as_is() {
        let input = "&#57343;&#99999;";
        assert_eq!(fix_surrogate_pairs(input), input);
    }

    #[test]
    fn test_plain_text_borrowed() {
        assert!(matches!(fix_surrogate_pairs("hello"), Cow::Borrowed("hello")));
    }
}
