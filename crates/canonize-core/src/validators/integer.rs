//! Integer validation.

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::{NUMERIC_COSMETICS, group_thousands, scan_number};
use crate::valid::Valid;
use crate::verify::verify_integer;

/// Validate text as a signed integer within `[minimum, maximum]`
/// (inclusive; the maximum is ignored when it is below the minimum).
///
/// Grouping separators, underscores, and whitespace in the input are
/// tolerated and ignored. `common` and `particular` are grouped by
/// thousands; `particular` keeps underscores as the grouping character
/// when the input used them.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_integer(input: &str, minimum: i64, maximum: i64) -> ValidationResult<Valid<i64>> {
    let buffer = TextBuffer::ensure_content(input, "integer value", true)?;
    let scan = scan_number(&buffer, NUMERIC_COSMETICS, true, false)?;

    let machine: i64 = scan
        .token
        .to_string()
        .parse()
        .map_err(|e: std::num::ParseIntError| ValidationError::Unparseable {
            kind: "number",
            input: input.to_string(),
            source: Some(Box::new(e)),
        })?;
    let machine = verify_integer(machine, minimum, maximum)?;

    let common = group_thousands(&machine.to_string());
    let particular = if scan.cosmetics.contains_char('_') {
        common.replace(',', "_")
    } else {
        common.clone()
    };
    Ok(Valid {
        machine,
        common,
        particular,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_grouped_input() {
        let result = validate_integer("1234567", i64::MIN, i64::MAX).unwrap();
        assert_eq!(result.machine, 1_234_567);
        assert_eq!(result.common, "1,234,567");
        assert_eq!(result.particular, "1,234,567");

        let result = validate_integer("-1,234", i64::MIN, i64::MAX).unwrap();
        assert_eq!(result.machine, -1234);
        assert_eq!(result.common, "-1,234");
    }

    #[test]
    fn underscores_carry_into_particular() {
        let result = validate_integer("1_234_567", i64::MIN, i64::MAX).unwrap();
        assert_eq!(result.common, "1,234,567");
        assert_eq!(result.particular, "1_234_567");
    }

    #[test]
    fn idempotent_over_both_renderings() {
        let first = validate_integer("9_876_543", i64::MIN, i64::MAX).unwrap();
        let again = validate_integer(&first.common, i64::MIN, i64::MAX).unwrap();
        assert_eq!(again.machine, first.machine);
        let again = validate_integer(&first.particular, i64::MIN, i64::MAX).unwrap();
        assert_eq!(again.machine, first.machine);
        assert_eq!(again.particular, first.particular);
    }

    #[test]
    fn range_and_garbage_rejected() {
        assert!(matches!(
            validate_integer("5", 10, 20),
            Err(ValidationError::BelowMinimum { .. })
        ));
        assert!(matches!(
            validate_integer("25", 10, 20),
            Err(ValidationError::AboveMaximum { .. })
        ));
        // Inverted maximum disables the upper bound
        assert!(validate_integer("25", 10, 0).is_ok());
        assert!(matches!(
            validate_integer("12x4", i64::MIN, i64::MAX),
            Err(ValidationError::Disallowed { .. })
        ));
    }

    #[test]
    fn decimal_point_is_not_an_integer_character() {
        assert!(matches!(
            validate_integer("12.5", i64::MIN, i64::MAX),
            Err(ValidationError::Disallowed { ref found, .. }) if found == "."
        ));
    }
}
