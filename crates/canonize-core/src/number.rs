//! Shared numeric token extraction.
//!
//! Every numeric validator (integer, double, currency, percentage) and the
//! digit-string validators (phone, SSN, ISBN, credit card) funnel through
//! [`scan_number`], which separates an admissible numeric token from the
//! cosmetic characters around it and rejects everything else.

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};

/// Character used for thousands grouping in rendered output.
pub(crate) const GROUPING: char = ',';

/// Character separating the fractional part of a floating number.
pub(crate) const DECIMAL_POINT: char = '.';

/// Canonical exponent marker; input matches `e`/`E` case-insensitively.
pub(crate) const EXPONENT: char = 'e';

/// Cosmetic characters tolerated in numeric input: grouping separators,
/// whitespace, and underscores.
pub const NUMERIC_COSMETICS: &str = ", _";

/// Cosmetic characters tolerated in digit-string codes (SSN, ISBN, credit
/// card): dashes and whitespace.
pub const CODE_COSMETICS: &str = "- ";

/// Outcome of a [`scan_number`] pass.
#[derive(Debug)]
pub struct NumberScan {
    /// The admissible numeric token, in original character order.
    pub token: TextBuffer,
    /// Cosmetic characters actually encountered, for reconstructing the
    /// display formatting of the input later.
    pub cosmetics: TextBuffer,
}

/// Extract a numeric token from `buffer`.
///
/// Digits always pass; a sign passes when `signed`; one decimal separator
/// and an `e`/`E` exponent marker pass when `floating`. Characters listed
/// in `extras` (with `' '` standing for any whitespace) are collected as
/// cosmetics. Any other character is an error, and the full offending set
/// is reported at once, each character listed a single time.
pub fn scan_number(
    buffer: &TextBuffer,
    extras: &str,
    signed: bool,
    floating: bool,
) -> ValidationResult<NumberScan> {
    // Exponent markers are hidden behind a sentinel so the scan below has
    // a single character to recognize, then restored canonically.
    const SENTINEL: char = '\u{FFFF}';

    let mut token = buffer.clone();
    token.trim();
    if floating {
        token
            .replace_char('e', SENTINEL)
            .replace_char('E', SENTINEL);
    }

    let mut cosmetics = TextBuffer::new();
    let mut errors = TextBuffer::new();
    let mut i = 0;
    while i < token.len() {
        let c = token.char_at(i);
        let admissible = c.is_ascii_digit()
            || (floating && (c == DECIMAL_POINT || c == SENTINEL))
            || (signed && (c == '+' || c == '-'));
        if admissible {
            i += 1;
        } else {
            token.delete_at(i);
            if extras.contains(c) {
                cosmetics.push(c);
            } else if c.is_whitespace() && extras.contains(' ') {
                cosmetics.push(' ');
            } else if !errors.contains_char(c) {
                errors.push(c);
            }
        }
    }
    if floating {
        token.replace_char(SENTINEL, EXPONENT);
    }

    if !errors.is_empty() {
        return Err(ValidationError::Disallowed {
            found: errors.to_string(),
            input: buffer.to_string(),
        });
    }
    Ok(NumberScan { token, cosmetics })
}

/// Insert thousands-grouping separators into the integer part of a plain
/// numeric string. A leading sign and a fractional part are preserved;
/// exponent forms are returned unchanged.
#[must_use]
pub fn group_thousands(number: &str) -> String {
    if number.contains(['e', 'E']) {
        return number.to_string();
    }
    let (sign, rest) = number
        .strip_prefix('-')
        .map_or(("", number), |rest| ("-", rest));
    let (int_part, fraction) = rest
        .split_once(DECIMAL_POINT)
        .map_or((rest, None), |(i, f)| (i, Some(f)));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(number.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUPING);
        }
        grouped.push(*c);
    }

    let mut result = String::new();
    result.push_str(sign);
    result.push_str(&grouped);
    if let Some(f) = fraction {
        result.push(DECIMAL_POINT);
        result.push_str(f);
    }
    result
}

/// Render `value` with the given number of significant digits, switching
/// to scientific notation for magnitudes the fixed form shows poorly.
#[must_use]
pub fn format_significant(value: f64, digits: u32) -> String {
    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits as usize - 1, 0.0);
    }
    let exponent = value.abs().log10().floor() as i32 + 1;
    if exponent > digits as i32 || exponent < -3 {
        format!("{:.*e}", digits as usize - 1, value)
    } else {
        let decimals = (digits as i32 - exponent).max(0) as usize;
        format!("{value:.decimals$}")
    }
}
