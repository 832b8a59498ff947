//! Email address validation.
//!
//! A sequential automaton over the buffer, built around a simplified
//! reading of RFC 5322 (sections 3.2.3 and 3.4.1) and RFC 5321, with
//! practical notes from RFC 3696. Optional elements — comments, display
//! names, escapes, whitespace — are stripped or resolved, leaving the
//! minimal bare address. Domains are checked for shape only, never for
//! existence.
//!
//! Escaped characters and quoted substrings are protected during the
//! structural passes by substituting markers from a Unicode private-use
//! range, then restored into the final address. Content protected this
//! way bypasses the character checks, as quoted content is allowed to.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::valid::Valid;

/// Punctuation permitted in an unquoted local-part, besides letters and
/// digits.
const PERMITTED_LOCAL: &str = "#-_~$&'()*+,;=:.";

/// Private-use range markers are drawn from; anything in this range in
/// the local-part is a protected unit awaiting restoration.
const PRIVATE_USE_START: char = '\u{E000}';
const PRIVATE_USE_END: char = '\u{F8FF}';

/// First marker handed out; later markers count down from here.
const FIRST_MARKER: char = '\u{F0AA}';

/// Length ceilings from RFC 5321.
const MAX_LOCAL: usize = 64;
const MAX_DOMAIN: usize = 253;
const MAX_TOTAL: usize = 254;

/// A dot may not lead, trail, or double up within either address part.
static DOT_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.|\.\.|\.$").expect("hard-coded pattern compiles"));

fn previous_marker(marker: char) -> char {
    char::from_u32(marker as u32 - 1).unwrap_or(PRIVATE_USE_START)
}

/// Resolve `%XX` hex escapes in place. An escaped percent (`\%`) or
/// escaped backslash is left for the protection pass; a decoded character
/// is re-examined, so nested encodings cascade.
fn resolve_hex_escapes(bb: &mut TextBuffer) {
    let mut i = 0;
    while i < bb.len() {
        let c = bb.char_at(i);
        if c == '\\' && i + 1 < bb.len() {
            let next = bb.char_at(i + 1);
            if next == '%' || next == '\\' {
                i += 2;
                continue;
            }
        }
        if c == '%' && i + 2 < bb.len() {
            let high = bb.char_at(i + 1).to_digit(16);
            let low = bb.char_at(i + 2).to_digit(16);
            if let (Some(high), Some(low)) = (high, low) {
                let decoded = (high * 16 + low) as u8 as char;
                bb.set_char(i, decoded);
                bb.delete(i + 1, i + 3);
                if decoded == '\\' {
                    i += 1;
                }
                continue;
            }
        }
        i += 1;
    }
}

/// Replace backslash escapes and quoted substrings with private-use
/// markers, remembering the original text for restoration. A quote opens
/// only at the start of the buffer or after a dot, and closes only at the
/// end or before a dot or `@`.
fn protect_escapes(bb: &mut TextBuffer) -> ValidationResult<HashMap<char, String>> {
    let mut marker = FIRST_MARKER;
    let mut protected = HashMap::new();
    let mut i = 0;
    'outer: while i < bb.len() {
        let c = bb.char_at(i);
        if c == '\\' && i + 1 < bb.len() {
            protected.insert(marker, bb.char_at(i + 1).to_string());
            bb.set_char(i, marker);
            marker = previous_marker(marker);
            bb.delete_at(i + 1);
        } else if c == '"' && (i == 0 || bb.char_at(i - 1) == '.') && i + 1 < bb.len() {
            let mut j = i + 1;
            while j < bb.len() {
                if bb.char_at(j) == '"'
                    && (j + 1 == bb.len()
                        || bb.char_at(j + 1) == '.'
                        || bb.char_at(j + 1) == '@')
                {
                    protected.insert(marker, bb.sub(i, j + 1).to_string());
                    bb.set_char(i, marker);
                    marker = previous_marker(marker);
                    bb.delete(i + 1, j + 1);
                    i += 1;
                    continue 'outer;
                }
                j += 1;
            }
            return Err(ValidationError::UnterminatedQuote);
        }
        i += 1;
    }
    Ok(protected)
}

/// Strip comments. `<...>` and `[...]` bound the kept region — text
/// outside is a display name or note and is discarded; `(...)` bounds a
/// discarded comment, removed repeatedly until none remain.
fn strip_comments(bb: &mut TextBuffer) -> ValidationResult<()> {
    for (open, close) in [('<', '>'), ('[', ']')] {
        match (bb.index_of(open), bb.index_of(close)) {
            (None, None) => {}
            (Some(first), Some(last)) if first <= last => {
                let len = bb.len();
                bb.delete(last, len).delete(0, first + 1);
            }
            _ => return Err(ValidationError::Unmatched { open, close }),
        }
    }
    loop {
        match (bb.index_of('('), bb.index_of(')')) {
            (None, None) => return Ok(()),
            (Some(first), Some(last)) if first <= last => {
                bb.delete(first, last + 1);
            }
            _ => {
                return Err(ValidationError::Unmatched {
                    open: '(',
                    close: ')',
                });
            }
        }
    }
}

/// Validate text as an email address, returning the minimal bare form.
///
/// All three triple fields are the same string.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_email(input: &str) -> ValidationResult<Valid<String>> {
    let mut bb = TextBuffer::ensure_content(input, "email address", false)?;

    resolve_hex_escapes(&mut bb);
    bb.replace_char('\u{201C}', '"').replace_char('\u{201D}', '"');
    let protected = protect_escapes(&mut bb)?;
    strip_comments(&mut bb)?;
    bb.edit_whitespace(false);

    // A trailing separator would otherwise vanish in the split.
    if !bb.is_empty() && bb.last_char() == '@' {
        bb.push(' ');
    }
    let parts = bb.split("@");
    let [mut local, mut domain]: [TextBuffer; 2] =
        parts.try_into().map_err(|_| ValidationError::AtSignCount)?;

    // A single pair of outer single quotes around the whole address.
    if !local.is_empty()
        && local.char_at(0) == '\''
        && !domain.is_empty()
        && domain.last_char() == '\''
    {
        local.delete_at(0);
        domain.delete_last();
    }

    if local.is_empty() {
        return Err(ValidationError::Blank {
            field: "local-part of address",
        });
    }
    if domain.is_empty() {
        return Err(ValidationError::Blank {
            field: "domain for address",
        });
    }

    // Local-part character check runs before restoration, so protected
    // content is exempt; the markers themselves are in the permitted
    // private-use range.
    let mut not_permitted = TextBuffer::new();
    for i in 0..local.len() {
        let c = local.char_at(i);
        let ok = c.is_alphanumeric()
            || PERMITTED_LOCAL.contains(c)
            || (PRIVATE_USE_START..=PRIVATE_USE_END).contains(&c);
        if !ok && !not_permitted.contains_char(c) {
            not_permitted.push(c);
        }
    }
    if !not_permitted.is_empty() {
        return Err(ValidationError::DisallowedIn {
            found: not_permitted.to_string(),
            part: "local-part",
        });
    }

    for (marker, original) in &protected {
        let marker = marker.to_string();
        local.replace(&marker, original);
        domain.replace(&marker, original);
    }

    // Domain names allow letters, digits, and interior dashes and dots.
    let mut not_permitted = TextBuffer::new();
    let dlen = domain.len();
    for i in 0..dlen {
        let c = domain.char_at(i);
        let ok = c.is_alphanumeric() || (i != 0 && i != dlen - 1 && (c == '-' || c == '.'));
        if !ok && !not_permitted.contains_char(c) {
            not_permitted.push(c);
        }
    }
    if !not_permitted.is_empty() {
        return Err(ValidationError::DisallowedIn {
            found: not_permitted.to_string(),
            part: "domain name",
        });
    }

    for part in [&local, &domain] {
        let text = part.to_string();
        if let Some(found) = DOT_RULE.find(&text) {
            let position = found.end();
            return Err(ValidationError::DotPlacement {
                part: text,
                position,
            });
        }
    }
    if !domain.contains_char('.') {
        return Err(ValidationError::MissingDomainDot);
    }

    if local.len() > MAX_LOCAL {
        return Err(ValidationError::TooLong {
            what: "local-part",
            length: local.len(),
            limit: MAX_LOCAL,
        });
    }
    if domain.len() > MAX_DOMAIN {
        return Err(ValidationError::TooLong {
            what: "domain",
            length: domain.len(),
            limit: MAX_DOMAIN,
        });
    }

    local.push('@').push_buffer(&domain);
    let address = local.to_string();
    if address.chars().count() > MAX_TOTAL {
        return Err(ValidationError::TooLong {
            what: "email address",
            length: address.chars().count(),
            limit: MAX_TOTAL,
        });
    }
    Ok(Valid::uniform(address))
}
