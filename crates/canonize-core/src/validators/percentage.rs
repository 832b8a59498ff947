//! Percentage validation.

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::{NUMERIC_COSMETICS, format_significant, scan_number};
use crate::valid::Valid;
use crate::verify::verify_double;

/// Magnitudes below this snap to exactly zero.
const MINIMUM_MAGNITUDE: f64 = 1e-6;

/// Significant digits shown when the caller imposes none.
const DEFAULT_DIGITS: u32 = 2;

/// Validate text as a percentage.
///
/// A trailing `%` divides the parsed value by 100, so `"45%"` and
/// `"0.45"` mean the same thing. The machine value is the fraction.
/// `common` is the value times 100 with a trailing `%`; `particular`
/// equals `common` when the input carried a percent sign, otherwise it is
/// the bare fraction.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_percentage(
    input: &str,
    minimum: f64,
    maximum: f64,
    digits: u32,
) -> ValidationResult<Valid<f64>> {
    let mut buffer = TextBuffer::ensure_content(input, "percentage value", true)?;

    let percent_present = buffer.last_char() == '%';
    if percent_present {
        buffer.delete_last();
    }

    let scan = scan_number(&buffer, NUMERIC_COSMETICS, true, true)?;
    let mut value: f64 = scan
        .token
        .to_string()
        .parse()
        .map_err(|e: std::num::ParseFloatError| ValidationError::Unparseable {
            kind: "percentage",
            input: input.to_string(),
            source: Some(Box::new(e)),
        })?;
    if percent_present {
        value /= 100.0;
    }
    if value.abs() < MINIMUM_MAGNITUDE {
        value = 0.0;
    }
    let machine = verify_double(value, minimum, maximum, digits)?;

    let shown = if digits == 0 { DEFAULT_DIGITS } else { digits };
    let common = format!("{}%", format_significant(machine * 100.0, shown));
    let particular = if percent_present {
        common.clone()
    } else {
        machine.to_string()
    };
    Ok(Valid {
        machine,
        common,
        particular,
    })
}
