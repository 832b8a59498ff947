//! Floating-point validation.

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::{NUMERIC_COSMETICS, group_thousands, scan_number};
use crate::valid::Valid;
use crate::verify::verify_double;

/// Validate text as a floating-point value within `[minimum, maximum]`.
///
/// Decimal point and exponent forms are accepted; grouping separators,
/// underscores, and whitespace are tolerated and ignored. With a nonzero
/// `digits` the value is rounded to that many significant digits (half to
/// even) before the range check. `common` is the shortest round-trip
/// rendering; `particular` reapplies the input's grouping style.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_double(
    input: &str,
    minimum: f64,
    maximum: f64,
    digits: u32,
) -> ValidationResult<Valid<f64>> {
    let buffer = TextBuffer::ensure_content(input, "double value", true)?;
    let scan = scan_number(&buffer, NUMERIC_COSMETICS, true, true)?;

    let parsed: f64 = scan
        .token
        .to_string()
        .parse()
        .map_err(|e: std::num::ParseFloatError| ValidationError::Unparseable {
            kind: "number",
            input: input.to_string(),
            source: Some(Box::new(e)),
        })?;
    let machine = verify_double(parsed, minimum, maximum, digits)?;

    let common = machine.to_string();
    let particular = if scan.cosmetics.contains_char('_') {
        group_thousands(&common).replace(',', "_")
    } else if scan.cosmetics.contains_char(',') {
        group_thousands(&common)
    } else {
        common.clone()
    };
    Ok(Valid {
        machine,
        common,
        particular,
    })
}
