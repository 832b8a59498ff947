//! Social Security number validation.

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::{CODE_COSMETICS, scan_number};
use crate::valid::Valid;

/// Digits in a Social Security number.
const SSN_LENGTH: usize = 9;

/// Dashes go after the area (3 digits) and group (2 digits) fields.
const FIELD_BREAKS: [usize; 2] = [3, 5];

/// Validate text as a Social Security number: exactly nine digits, with
/// dashes and spaces tolerated.
///
/// `machine` and `particular` are the bare digits; `common` is the
/// dashed `AAA-GG-SSSS` form. `particular` uses the dashed form instead
/// when the input itself contained a dash.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_ssn(input: &str) -> ValidationResult<Valid<String>> {
    let buffer = TextBuffer::ensure_content(input, "Social Security number", true)?;
    let scan = scan_number(&buffer, CODE_COSMETICS, false, false)?;

    if scan.token.len() > SSN_LENGTH {
        return Err(ValidationError::TooManyDigits {
            kind: "SSN",
            input: input.to_string(),
        });
    }
    if scan.token.len() < SSN_LENGTH {
        return Err(ValidationError::TooFewDigits {
            kind: "SSN",
            input: input.to_string(),
        });
    }

    let machine = scan.token.to_string();
    let common = scan
        .token
        .clone()
        .decorate("-", &FIELD_BREAKS)
        .to_string();
    let particular = if scan.cosmetics.contains_char('-') {
        common.clone()
    } else {
        machine.clone()
    };
    Ok(Valid {
        machine,
        common,
        particular,
    })
}
