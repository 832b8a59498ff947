//! Range and precision checks shared by the numeric validators.
//!
//! One inclusive-range policy lives here: a maximum smaller than the
//! minimum means "no maximum", so callers can pass the full sentinel range
//! (`i64::MIN..=i64::MAX`, infinities) to disable bounds entirely.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ValidationError, ValidationResult};

/// Place `value` relative to the inclusive `[minimum, maximum]` range.
///
/// `Less` means below the minimum, `Greater` above the maximum, `Equal`
/// in range. When `maximum < minimum` the maximum is ignored.
#[must_use]
pub fn compare_in_range_i64(value: i64, minimum: i64, maximum: i64) -> Ordering {
    if value < minimum {
        Ordering::Less
    } else if maximum >= minimum && value > maximum {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Floating counterpart of [`compare_in_range_i64`]; infinite bounds
/// behave as "no bound".
#[must_use]
pub fn compare_in_range_f64(value: f64, minimum: f64, maximum: f64) -> Ordering {
    if value < minimum {
        Ordering::Less
    } else if maximum >= minimum && value > maximum {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Decimal counterpart; `None` bounds are absent bounds.
#[must_use]
pub fn compare_in_range_decimal(
    value: &Decimal,
    minimum: Option<&Decimal>,
    maximum: Option<&Decimal>,
) -> Ordering {
    if minimum.is_some_and(|min| value < min) {
        return Ordering::Less;
    }
    if let Some(max) = maximum {
        if minimum.is_none_or(|min| max >= min) && value > max {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

/// Date counterpart; `None` bounds are absent bounds.
#[must_use]
pub fn compare_in_range_date(
    value: NaiveDate,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
) -> Ordering {
    if minimum.is_some_and(|min| value < min) {
        return Ordering::Less;
    }
    if let Some(max) = maximum {
        if minimum.is_none_or(|min| max >= min) && value > max {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

/// Check an integer against its inclusive bounds.
pub fn verify_integer(value: i64, minimum: i64, maximum: i64) -> ValidationResult<i64> {
    match compare_in_range_i64(value, minimum, maximum) {
        Ordering::Less => Err(ValidationError::BelowMinimum {
            value: value.to_string(),
            minimum: minimum.to_string(),
        }),
        Ordering::Greater => Err(ValidationError::AboveMaximum {
            value: value.to_string(),
            maximum: maximum.to_string(),
        }),
        Ordering::Equal => Ok(value),
    }
}

/// Round a float to `digits` significant digits, half to even. Zero digits
/// means full precision.
#[must_use]
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if digits == 0 || value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32 + 1;
    let power = 10f64.powi(digits as i32 - magnitude);
    (value * power).round_ties_even() / power
}

/// Round a float to its significant digits, then check it against its
/// inclusive bounds. The rounded value is what range checking sees and
/// what the caller gets back.
pub fn verify_double(value: f64, minimum: f64, maximum: f64, digits: u32) -> ValidationResult<f64> {
    let rounded = round_significant(value, digits);
    match compare_in_range_f64(rounded, minimum, maximum) {
        Ordering::Less => Err(ValidationError::BelowMinimum {
            value: rounded.to_string(),
            minimum: minimum.to_string(),
        }),
        Ordering::Greater => Err(ValidationError::AboveMaximum {
            value: rounded.to_string(),
            maximum: maximum.to_string(),
        }),
        Ordering::Equal => Ok(rounded),
    }
}

/// Check a decimal's scale, round it to `decimals` places (half away from
/// zero), and check it against its inclusive bounds.
///
/// A `decimals` of zero disables both the scale ceiling and the rounding.
pub fn verify_decimal(
    value: Decimal,
    minimum: Option<&Decimal>,
    maximum: Option<&Decimal>,
    decimals: u32,
) -> ValidationResult<Decimal> {
    let value = if decimals == 0 {
        value
    } else {
        // The literal's own scale counts: "1.50" carries two decimal
        // digits even though the trailing zero is arithmetically inert.
        let scale = value.scale();
        if scale > decimals {
            return Err(ValidationError::ScaleExceeded { scale, decimals });
        }
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
    };
    match compare_in_range_decimal(&value, minimum, maximum) {
        Ordering::Less => Err(ValidationError::BelowMinimum {
            value: value.to_string(),
            minimum: minimum.map(Decimal::to_string).unwrap_or_default(),
        }),
        Ordering::Greater => Err(ValidationError::AboveMaximum {
            value: value.to_string(),
            maximum: maximum.map(Decimal::to_string).unwrap_or_default(),
        }),
        Ordering::Equal => Ok(value),
    }
}

/// Check a date against its inclusive bounds; violations render the
/// offending and bounding dates in ISO form.
pub fn verify_date(
    value: NaiveDate,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
) -> ValidationResult<NaiveDate> {
    match compare_in_range_date(value, minimum, maximum) {
        Ordering::Less => Err(ValidationError::BelowMinimum {
            value: value.format("%Y-%m-%d").to_string(),
            minimum: minimum
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }),
        Ordering::Greater => Err(ValidationError::AboveMaximum {
            value: value.format("%Y-%m-%d").to_string(),
            maximum: maximum
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }),
        Ordering::Equal => Ok(value),
    }
}
