//! Credit card number validation.

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::{CODE_COSMETICS, scan_number};
use crate::valid::Valid;

/// Fewest digits any card number carries.
const MINIMUM_LENGTH: usize = 7;

/// Group boundaries for the punctuated rendering, every four digits.
const GROUP_BREAKS: [usize; 8] = [4, 8, 12, 16, 20, 24, 28, 32];

/// Luhn checksum over a digit string, scanning from the right in pairs:
/// the rightmost digit takes weight 1, its neighbor weight 2, with 9 cast
/// out of any two-digit product.
fn luhn_sum(digits: &TextBuffer) -> i32 {
    let mut sum = 0;
    let mut i = digits.len() as i32 - 1;
    while i >= 0 {
        for j in 0..2 {
            if i - j >= 0 {
                let digit = digits.char_at((i - j) as usize).to_digit(10).unwrap_or(0) as i32;
                sum += (digit * (j + 1) - 1) % 9 + 1;
            }
        }
        i -= 2;
    }
    sum
}

/// Validate text as a credit card number: at least seven digits, with
/// dashes and spaces tolerated, passing the Luhn checksum.
///
/// `machine` and `common` are the bare digits; `particular` regroups into
/// fours with the input's own delimiter when one was present.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_credit_card(input: &str) -> ValidationResult<Valid<String>> {
    let buffer = TextBuffer::ensure_content(input, "credit card number", false)?;
    let scan = scan_number(&buffer, CODE_COSMETICS, false, false)?;

    if scan.token.len() < MINIMUM_LENGTH {
        return Err(ValidationError::TooFewDigits {
            kind: "credit card number",
            input: input.to_string(),
        });
    }
    if luhn_sum(&scan.token) % 10 != 0 {
        return Err(ValidationError::Checksum {
            kind: "credit card number",
            input: input.to_string(),
        });
    }

    let machine = scan.token.to_string();
    let delimiter = scan.cosmetics.first_of(&['-', ' ']);
    let particular = delimiter.map_or_else(
        || machine.clone(),
        |d| {
            scan.token
                .clone()
                .decorate(&d.to_string(), &GROUP_BREAKS)
                .to_string()
        },
    );
    Ok(Valid {
        common: machine.clone(),
        particular,
        machine,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luhn_accepts_and_rejects() {
        let result = validate_credit_card("4111111111111111").unwrap();
        assert_eq!(result.machine, "4111111111111111");
        assert_eq!(result.common, "4111111111111111");
        assert_eq!(result.particular, "4111111111111111");

        assert!(matches!(
            validate_credit_card("4111111111111112"),
            Err(ValidationError::Checksum { .. })
        ));
    }

    #[test]
    fn odd_length_numbers_sum_correctly() {
        // 13-digit Visa test number
        let result = validate_credit_card("4222222222222").unwrap();
        assert_eq!(result.machine, "4222222222222");
    }

    #[test]
    fn delimiter_carries_into_particular() {
        let result = validate_credit_card("4111-1111-1111-1111").unwrap();
        assert_eq!(result.machine, "4111111111111111");
        assert_eq!(result.particular, "4111-1111-1111-1111");

        let result = validate_credit_card("4111 1111 1111 1111").unwrap();
        assert_eq!(result.particular, "4111 1111 1111 1111");
    }

    #[test]
    fn too_short_and_garbage_rejected() {
        assert!(matches!(
            validate_credit_card("411111"),
            Err(ValidationError::TooFewDigits { .. })
        ));
        assert!(matches!(
            validate_credit_card("4111x1111"),
            Err(ValidationError::Disallowed { .. })
        ));
    }

    #[test]
    fn idempotent_over_both_renderings() {
        let first = validate_credit_card("4111-1111-1111-1111").unwrap();
        let again = validate_credit_card(&first.common).unwrap();
        assert_eq!(again.machine, first.machine);
        let again = validate_credit_card(&first.particular).unwrap();
        assert_eq!(again.machine, first.machine);
        assert_eq!(again.particular, first.particular);
    }
}
