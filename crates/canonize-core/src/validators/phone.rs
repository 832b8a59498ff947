//! Telephone number validation.
//!
//! Only the North American Numbering Plan (NANP) is implemented: a fixed
//! 3-3-4 digit structure under country code 1, shared by a closed set of
//! countries and territories. Other regions are a distinct error, not a
//! parse failure, so callers can tell "wrong number" from "unsupported
//! plan".

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::scan_number;
use crate::valid::Valid;

/// ISO 3166-1 alpha-2 codes of NANP participants. "021" stands in when a
/// caller supplies a region that has no country at all.
static NANP: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "AS", "AI", "AG", "BS", "BB", "BM", "VG", "CA", "KY", "DM", "DO", "GD", "GU", "JM", "MS",
        "MP", "PR", "KN", "WL", "VC", "WV", "SX", "MF", "TT", "TC", "US", "VI", "021",
    ])
});

/// Region assumed when the caller supplies none.
const DEFAULT_REGION: &str = "US";

/// The one NANP country code.
const COUNTRY_CODE: &str = "+1";

/// Punctuation tolerated around NANP digits.
const PHONE_COSMETICS: &str = "()-/. ";

/// Digits in a NANP number, after the country code.
const REQUIRED_DIGITS: usize = 10;

/// Decoration points for `common`: parens around the area code, a dash
/// before the line number.
const NANP_BREAKS: [usize; 3] = [2, 5, 8];

/// Validate text as a telephone number for `region` (default "US").
///
/// A leading `+` must be followed by the NANP country digit and makes the
/// country code mandatory in `particular`; `country_code_required` forces
/// it regardless. Parens, dashes, slashes, dots, and spaces are tolerated
/// around exactly ten digits. `machine` is `+1` plus the digits;
/// `common` is the `+1(AAA)OOO-LLLL` form; `particular` reconstructs the
/// input's own punctuation in regularized positions.
#[tracing::instrument(skip_all, fields(input = %input, region = region.unwrap_or(DEFAULT_REGION)))]
pub fn validate_phone(
    input: &str,
    country_code_required: bool,
    region: Option<&str>,
) -> ValidationResult<Valid<String>> {
    let mut buffer = TextBuffer::ensure_content(input, "telephone number", false)?;
    buffer.trim();

    let region = region.unwrap_or(DEFAULT_REGION);
    if !NANP.contains(region) {
        return Err(ValidationError::UnsupportedRegion {
            region: region.to_string(),
        });
    }

    let flag_present = !buffer.is_empty() && buffer.char_at(0) == '+';
    if flag_present {
        buffer.delete_at(0);
    }

    let mut country_code_required = country_code_required;
    if flag_present {
        if buffer.is_empty() || buffer.char_at(0) != '1' {
            return Err(ValidationError::MissingCountryCode);
        }
        buffer.delete_at(0);
        country_code_required = true;
    }

    let scan = scan_number(&buffer, PHONE_COSMETICS, false, false)?;
    if scan.token.len() != REQUIRED_DIGITS {
        return Err(ValidationError::DigitCount {
            given: scan.token.len(),
            required: REQUIRED_DIGITS,
        });
    }

    let digits = scan.token.to_string();
    let machine = format!("{COUNTRY_CODE}{digits}");
    let common = TextBuffer::from(machine.as_str())
        .decorate("()-", &NANP_BREAKS)
        .to_string();

    // Reassemble the particular form from whichever punctuation the input
    // actually used, each piece in its regularized position.
    let space = if scan.cosmetics.contains_char(' ') {
        " "
    } else {
        ""
    };
    let (area, area_term) = if scan.cosmetics.contains_char('(') {
        (format!("({})", &digits[..3]), space)
    } else {
        let term = scan
            .cosmetics
            .first_of(&['/', '-', '.', ' '])
            .map_or("", separator_str);
        (digits[..3].to_string(), term)
    };
    let office_term = scan.cosmetics.first_of(&['-', '.', ' ']).map_or("", separator_str);
    let country = if country_code_required {
        format!("{COUNTRY_CODE}{space}")
    } else {
        String::new()
    };
    let particular = format!(
        "{country}{area}{area_term}{office}{office_term}{line}",
        office = &digits[3..6],
        line = &digits[6..],
    );

    Ok(Valid {
        machine,
        common,
        particular,
    })
}

const fn separator_str(c: char) -> &'static str {
    match c {
        '/' => "/",
        '-' => "-",
        '.' => ".",
        _ => " ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_us_number() {
        let result = validate_phone("(212) 555-0100", false, None).unwrap();
        assert_eq!(result.machine, "+12125550100");
        assert_eq!(result.common, "+1(212)555-0100");
        assert_eq!(result.particular, "(212) 555-0100");
    }

    #[test]
    fn bare_digits_stay_bare_in_particular() {
        let result = validate_phone("2125550100", false, None).unwrap();
        assert_eq!(result.machine, "+12125550100");
        assert_eq!(result.particular, "2125550100");
    }

    #[test]
    fn country_code_flag_consumes_the_one() {
        let result = validate_phone("+1 212 555 0100", false, None).unwrap();
        assert_eq!(result.machine, "+12125550100");
        // Flag in the input makes the country code mandatory in output
        assert_eq!(result.particular, "+1 212 555 0100");

        assert!(matches!(
            validate_phone("+2125550100", false, None),
            Err(ValidationError::MissingCountryCode)
        ));
    }

    #[test]
    fn required_country_code_is_prepended() {
        let result = validate_phone("212/555-0100", true, None).unwrap();
        assert_eq!(result.particular, "+1212/555-0100");
    }

    #[test]
    fn digit_count_must_be_exact() {
        assert!(matches!(
            validate_phone("555-0100", false, None),
            Err(ValidationError::DigitCount {
                given: 7,
                required: 10,
            })
        ));
        assert!(matches!(
            validate_phone("12125550100", false, None),
            Err(ValidationError::DigitCount { given: 11, .. })
        ));
    }

    #[test]
    fn non_nanp_regions_are_refused() {
        let err = validate_phone("020 7946 0958", false, Some("GB")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnsupportedRegion { ref region } if region == "GB"
        ));
        assert!(validate_phone("(246) 555-0100", false, Some("BB")).is_ok());
    }

    #[test]
    fn idempotent_over_both_renderings() {
        let first = validate_phone("(212) 555-0100", false, None).unwrap();
        let again = validate_phone(&first.common, false, None).unwrap();
        assert_eq!(again.machine, first.machine);
        let again = validate_phone(&first.particular, false, None).unwrap();
        assert_eq!(again.machine, first.machine);
        assert_eq!(again.particular, first.particular);
    }
}
