//! ISBN validation and hyphenation.

use std::sync::Arc;

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::number::{CODE_COSMETICS, scan_number};
use crate::ranges::{RangeIndex, shared_index};
use crate::valid::Valid;

/// Which ISBN form the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum IsbnKind {
    /// The ten-character form with its mod-11 check character.
    #[cfg_attr(feature = "clap", value(name = "10"))]
    Ten,
    /// The thirteen-digit form with its mod-10 check digit.
    #[cfg_attr(feature = "clap", value(name = "13"))]
    Thirteen,
}

/// Check character for a 9-digit ISBN-10 body: weighted sum 1..=9 mod 11,
/// mapped through `0123456789X`.
fn isbn10_check(body: &TextBuffer) -> char {
    let mut sum = 0usize;
    for j in 0..9 {
        sum += body.char_at(j).to_digit(10).unwrap_or(0) as usize * (j + 1);
    }
    const CHECK_CHARS: &[u8; 11] = b"0123456789X";
    CHECK_CHARS[sum % 11] as char
}

/// Check digit for a 12-digit ISBN-13 body: alternating weights 1 and 3,
/// complemented mod 10.
fn isbn13_check(body: &TextBuffer) -> char {
    let mut sum = 0u32;
    for j in 0..12 {
        let weight = if j % 2 == 0 { 1 } else { 3 };
        sum += body.char_at(j).to_digit(10).unwrap_or(0) * weight;
    }
    char::from_digit((10 - sum % 10) % 10, 10).unwrap_or('0')
}

/// Validate text as an ISBN, using the process-wide range index.
///
/// The first call fetches the range document from the International ISBN
/// Agency; see [`shared_index`]. Pass `kind` to convert between the
/// 10- and 13-character forms; `None` keeps the input's own form.
pub fn validate_isbn(input: &str, kind: Option<IsbnKind>) -> ValidationResult<Valid<String>> {
    let index: Arc<RangeIndex> = shared_index()?;
    validate_isbn_with(input, kind, &index)
}

/// Validate text as an ISBN against an explicit range index.
///
/// Steps: strip dashes and spaces, set aside the final check character,
/// require a 9- or 12-digit body, place the body within the registration
/// ranges, verify the check character, convert kinds if asked, and
/// hyphenate. `machine` is the bare form; `common` is hyphenated at the
/// registration boundaries; `particular` is hyphenated only when the
/// input itself was punctuated.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_isbn_with(
    input: &str,
    kind: Option<IsbnKind>,
    ranges: &RangeIndex,
) -> ValidationResult<Valid<String>> {
    let mut buffer = TextBuffer::ensure_content(input, "ISBN", true)?;

    // The check character may be an X, which the numeric scan would
    // reject, so it is set aside first.
    let mut check = buffer.last_char();
    buffer.delete_last();

    let scan = scan_number(&buffer, CODE_COSMETICS, false, false)?;
    let mut body = scan.token;
    let body_len = body.len();
    if body_len != 9 && body_len != 12 {
        return Err(ValidationError::IsbnLength {
            input: input.to_string(),
        });
    }
    let kind = kind.unwrap_or(if body_len == 9 {
        IsbnKind::Ten
    } else {
        IsbnKind::Thirteen
    });

    // Range placement always works on the 13-digit body.
    let mut full = body.clone();
    if body_len == 9 {
        full.insert_str(0, "978");
    }
    let placement = ranges
        .lookup(&full.to_string())
        .ok_or_else(|| ValidationError::IsbnPrefix {
            input: input.to_string(),
        })?;

    // Verify the given check character against the given form, then
    // convert the body if the caller asked for the other form.
    if body_len == 9 {
        if isbn10_check(&body) != check {
            return Err(ValidationError::Checksum {
                kind: "ISBN",
                input: input.to_string(),
            });
        }
        if kind == IsbnKind::Thirteen {
            body.insert_str(0, "978");
            check = isbn13_check(&body);
        }
    } else {
        if isbn13_check(&body) != check {
            return Err(ValidationError::Checksum {
                kind: "ISBN",
                input: input.to_string(),
            });
        }
        if kind == IsbnKind::Ten {
            body.delete(0, 3);
            check = isbn10_check(&body);
        }
    }
    body.push(check);

    let breaks: Vec<usize> = match kind {
        IsbnKind::Thirteen => vec![
            placement.prefix_len,
            placement.prefix_len + placement.leader_len,
            placement.prefix_len + placement.leader_len + placement.segment_len,
            body.len() - 1,
        ],
        IsbnKind::Ten => vec![
            placement.leader_len,
            placement.leader_len + placement.segment_len,
            body.len() - 1,
        ],
    };
    let machine = body.to_string();
    let common = body.clone().decorate("-", &breaks).to_string();
    let particular = if scan.cosmetics.is_empty() {
        machine.clone()
    } else {
        common.clone()
    };
    Ok(Valid {
        machine,
        common,
        particular,
    })
}
