//! Currency amount validation.

use rust_decimal::Decimal;

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::{NUMERIC_COSMETICS, group_thousands, scan_number};
use crate::valid::Valid;
use crate::verify::verify_decimal;

/// Symbol used in `common` renderings regardless of the input's symbol.
const DEFAULT_SYMBOL: char = '$';

/// Characters recognized as currency symbols before the digits.
const CURRENCY_SYMBOLS: &[char] = &[
    '$', '¢', '£', '¤', '¥', '₡', '₣', '₦', '₩', '₪', '₫', '€', '₱', '₴', '₹', '₽', '￥',
];

/// Validate text as a currency amount.
///
/// A single currency symbol may precede the digits; a sign or surrounding
/// parentheses mark a negative amount. The value is parsed at arbitrary
/// precision; a nonzero `decimals` rejects inputs with more decimal
/// places and rounds half-up to exactly that many. `common` carries the
/// default symbol, thousands grouping, and parentheses when negative;
/// `particular` mirrors the input's symbol, grouping, and negative style.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_currency(
    input: &str,
    minimum: Option<&Decimal>,
    maximum: Option<&Decimal>,
    decimals: u32,
) -> ValidationResult<Valid<Decimal>> {
    let mut buffer = TextBuffer::ensure_content(input, "currency", true)?;

    // Search for a currency symbol before any digit. The last position is
    // excluded: a symbol there would leave no digits, and that case should
    // fail as "no digits," not as a symbol problem.
    let mut symbol = None;
    for i in 0..buffer.len().saturating_sub(1) {
        let c = buffer.char_at(i);
        if CURRENCY_SYMBOLS.contains(&c) {
            symbol = Some(c);
            buffer.delete_at(i);
            break;
        }
        if c.is_ascii_digit() {
            break;
        }
    }

    // Parentheses around the whole amount mean negative.
    let negative_parens =
        !buffer.is_empty() && buffer.char_at(0) == '(' && buffer.last_char() == ')';
    if negative_parens {
        buffer.delete_last().set_char(0, '-');
    }

    let scan = scan_number(&buffer, NUMERIC_COSMETICS, true, true)?;
    let token = scan.token.to_string();
    let parsed = if token.contains('e') {
        Decimal::from_scientific(&token)
    } else {
        token.parse()
    }
    .map_err(|e: rust_decimal::Error| ValidationError::Unparseable {
        kind: "amount",
        input: input.to_string(),
        source: Some(Box::new(e)),
    })?;
    let machine = verify_decimal(parsed, minimum, maximum, decimals)?;

    let negative = machine.is_sign_negative();
    let magnitude = machine.abs();
    let fixed = if decimals == 0 {
        magnitude.to_string()
    } else {
        format!("{magnitude:.prec$}", prec = decimals as usize)
    };
    let grouped = group_thousands(&fixed);

    let mut common = format!("{DEFAULT_SYMBOL}{grouped}");
    if negative {
        common = format!("({common})");
    }

    let mut particular = if scan.cosmetics.contains_char('_') {
        grouped.replace(',', "_")
    } else if scan.cosmetics.contains_char(',') {
        grouped
    } else {
        fixed
    };
    if let Some(sym) = symbol {
        particular.insert(0, sym);
    }
    if negative {
        particular = if negative_parens {
            format!("({particular})")
        } else {
            format!("-{particular}")
        };
    }

    Ok(Valid {
        machine,
        common,
        particular,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn symbol_grouping_and_decimals() {
        let result = validate_currency("$1,234.50", None, None, 2).unwrap();
        assert_eq!(result.machine, dec("1234.50"));
        assert_eq!(result.common, "$1,234.50");
        assert_eq!(result.particular, "$1,234.50");
    }

    #[test]
    fn bare_amount_gains_default_symbol_in_common_only() {
        let result = validate_currency("1234.5", None, None, 2).unwrap();
        assert_eq!(result.common, "$1,234.50");
        assert_eq!(result.particular, "1234.50");
    }

    #[test]
    fn parenthesized_negative() {
        let result = validate_currency("($1,234.50)", None, None, 2).unwrap();
        assert_eq!(result.machine, dec("-1234.50"));
        assert_eq!(result.common, "($1,234.50)");
        assert_eq!(result.particular, "($1,234.50)");

        let result = validate_currency("-€5", None, None, 2).unwrap();
        assert_eq!(result.machine, dec("-5"));
        assert_eq!(result.common, "($5.00)");
        assert_eq!(result.particular, "-€5.00");
    }

    #[test]
    fn scale_enforced_before_rounding() {
        assert!(matches!(
            validate_currency("$1.234", None, None, 2),
            Err(ValidationError::ScaleExceeded {
                scale: 3,
                decimals: 2
            })
        ));
        // decimals 0 imposes nothing
        let result = validate_currency("$1.234", None, None, 0).unwrap();
        assert_eq!(result.machine, dec("1.234"));
    }

    #[test]
    fn trailing_zero_counts_as_a_decimal_digit() {
        assert!(matches!(
            validate_currency("$1.50", None, None, 1),
            Err(ValidationError::ScaleExceeded {
                scale: 2,
                decimals: 1
            })
        ));
    }

    #[test]
    fn lone_symbol_fails_as_missing_digits() {
        // The symbol search never consumes the final character, so a bare
        // symbol falls through to the numeric scan.
        assert!(validate_currency("$", None, None, 2).is_err());
    }

    #[test]
    fn idempotent_over_both_renderings() {
        let first = validate_currency("(¥2,500)", None, None, 2).unwrap();
        let again = validate_currency(&first.common, None, None, 2).unwrap();
        assert_eq!(again.machine, first.machine);
        let again = validate_currency(&first.particular, None, None, 2).unwrap();
        assert_eq!(again.machine, first.machine);
        assert_eq!(again.particular, first.particular);
    }

    #[test]
    fn range_checked_after_rounding() {
        let min = dec("0");
        let max = dec("100");
        assert!(matches!(
            validate_currency("$250", Some(&min), Some(&max), 2),
            Err(ValidationError::AboveMaximum { .. })
        ));
    }
}
