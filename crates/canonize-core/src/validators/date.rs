//! Date validation.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{Datelike, NaiveDate};

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::valid::Valid;
use crate::verify::verify_date;

/// Accepted date formats, tried in order. The order is a precedence
/// policy: numeric month-first forms, then ISO, then month-name forms,
/// each with 2-digit-year variants before 4-digit ones.
const FORMATS: [&str; 23] = [
    "%-m/%-d/%y",
    "%-m/%-d/%Y",
    "%-d.%-m.%y",
    "%-d.%-m.%Y",
    ISO_FORMAT,
    "%Y-%-m-%-d",
    "%y-%-m-%-d",
    "%b %-d %y",
    "%b %-d %Y",
    "%b %-d, %y",
    "%b %-d, %Y",
    "%-d %b %y",
    "%-d %b %Y",
    "%-d %b, %y",
    "%-d %b, %Y",
    "%B %-d %y",
    "%B %-d %Y",
    "%B %-d, %y",
    "%B %-d, %Y",
    "%-d %B %y",
    "%-d %B %Y",
    "%-d %B, %y",
    "%-d %B, %Y",
];

/// ISO 8601 with zero padding, used for every `common` rendering.
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Base century for two-digit years: every `yy` value reads as 20yy.
const CENTURY_BASE: i32 = 2000;

/// Try one format against the input, resolving leniently: a two-digit
/// year lands in [`CENTURY_BASE`], and a day past the end of the month
/// clamps to the month's last day.
fn try_format(text: &str, format: &str) -> Option<NaiveDate> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, text, StrftimeItems::new(format)).ok()?;

    let year = parsed
        .year()
        .or_else(|| parsed.year_mod_100().map(|y| CENTURY_BASE + y))?;
    let month = parsed.month()?;
    let day = parsed.day()?;

    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first
            .checked_add_months(chrono::Months::new(1))?
            .pred_opt()?;
        (day > last.day()).then_some(last)
    })
}

/// Validate text as a calendar date within the optional inclusive bounds.
///
/// Formats are tried in a fixed precedence order; the first that parses
/// the trimmed input wins. `common` is always ISO 8601; `particular` is
/// rendered back through whichever format matched.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_date(
    input: &str,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
) -> ValidationResult<Valid<NaiveDate>> {
    let mut buffer = TextBuffer::ensure_content(input, "date value", false)?;
    buffer.trim();
    let text = buffer.to_string();

    for format in FORMATS {
        if let Some(date) = try_format(&text, format) {
            let date = verify_date(date, minimum, maximum)?;
            return Ok(Valid {
                machine: date,
                common: date.format(ISO_FORMAT).to_string(),
                particular: date.format(format).to_string(),
            });
        }
    }
    Err(ValidationError::Unparseable {
        kind: "date",
        input: input.to_string(),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_input_round_trips() {
        let result = validate_date("2024-01-05", None, None).unwrap();
        assert_eq!(result.machine, ymd(2024, 1, 5));
        assert_eq!(result.common, "2024-01-05");
        assert_eq!(result.particular, "2024-01-05");
    }

    #[test]
    fn numeric_month_first_takes_precedence() {
        // 1/2/2024 reads month/day, not day/month
        let result = validate_date("1/2/2024", None, None).unwrap();
        assert_eq!(result.machine, ymd(2024, 1, 2));
        assert_eq!(result.common, "2024-01-02");
        assert_eq!(result.particular, "1/2/2024");
    }

    #[test]
    fn month_names_parse_in_either_order() {
        let result = validate_date("Jan 5, 2024", None, None).unwrap();
        assert_eq!(result.machine, ymd(2024, 1, 5));
        assert_eq!(result.particular, "Jan 5, 2024");

        let result = validate_date("5 January 2024", None, None).unwrap();
        assert_eq!(result.machine, ymd(2024, 1, 5));
        assert_eq!(result.common, "2024-01-05");
    }

    #[test]
    fn two_digit_years_read_as_this_century() {
        let result = validate_date("3/4/69", None, None).unwrap();
        assert_eq!(result.machine, ymd(2069, 3, 4));
        let result = validate_date("3/4/70", None, None).unwrap();
        assert_eq!(result.machine, ymd(2070, 3, 4));
        let result = validate_date("3/4/99", None, None).unwrap();
        assert_eq!(result.machine, ymd(2099, 3, 4));
    }

    #[test]
    fn day_overflow_clamps_to_month_end() {
        let result = validate_date("2/30/2024", None, None).unwrap();
        assert_eq!(result.machine, ymd(2024, 2, 29));
        let result = validate_date("2/30/2023", None, None).unwrap();
        assert_eq!(result.machine, ymd(2023, 2, 28));
    }

    #[test]
    fn range_violation_is_not_a_parse_retry() {
        let err = validate_date("2020-06-15", Some(ymd(2021, 1, 1)), None).unwrap_err();
        assert!(matches!(err, ValidationError::BelowMinimum { .. }));
    }

    #[test]
    fn gibberish_is_unparseable() {
        assert!(matches!(
            validate_date("next tuesday", None, None),
            Err(ValidationError::Unparseable { kind: "date", .. })
        ));
    }

    #[test]
    fn common_is_iso_regardless_of_matched_format() {
        for input in ["1/5/2024", "2024-01-05", "Jan 5 2024", "5 Jan 2024"] {
            let result = validate_date(input, None, None).unwrap();
            assert_eq!(result.common, "2024-01-05", "input {input:?}");
        }
    }
}
