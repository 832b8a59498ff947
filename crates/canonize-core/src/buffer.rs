//! Growable character buffer with bounds-checked edit primitives.
//!
//! [`TextBuffer`] is the substrate every validator edits in place: a mutable
//! sequence of `char`s supporting insertion, deletion, search, replacement,
//! splitting, whitespace normalization, and positional decoration. It has no
//! validation knowledge of its own.
//!
//! Index violations panic. They are programmer errors, a different class
//! entirely from [`ValidationError`](crate::error::ValidationError), which
//! reports problems with the *input*.

use std::fmt;

use crate::error::{ValidationError, ValidationResult};

/// Whitespace in the broad sense: separators, control characters, and the
/// zero-width format characters that sneak into pasted text.
pub(crate) fn is_layout(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '\u{00AD}' | '\u{200B}'..='\u{200F}' | '\u{2060}' | '\u{FEFF}')
}

/// Punctuation that makes the following letter title-cased in a name,
/// covering dashes, apostrophes, and the common word-joining marks.
const fn is_joining_punctuation(c: char) -> bool {
    matches!(
        c,
        '-' | '\u{2010}'..='\u{2015}'
            | '.'
            | '\''
            | '\u{2019}'
            | ','
            | ';'
            | ':'
            | '!'
            | '?'
            | '"'
            | '&'
            | '/'
            | '\\'
            | '*'
            | '@'
            | '#'
            | '%'
    )
}

fn to_title(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

fn to_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// A growable, mutable sequence of characters.
///
/// Backed by a `Vec<char>`, which supplies the geometric growth; all access
/// goes through index-checked operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// Check that there is input of the needed kind and wrap it in a buffer.
    ///
    /// Rejects input that is empty, or blank after optional whitespace
    /// stripping, with [`ValidationError::Blank`] naming the expected
    /// `field`. Every validator funnels its raw input through here.
    pub fn ensure_content(
        input: &str,
        field: &'static str,
        strip_whitespace: bool,
    ) -> ValidationResult<Self> {
        let mut buffer = Self::from(input);
        if strip_whitespace {
            buffer.edit_whitespace(false);
        }
        if buffer.is_blank() {
            return Err(ValidationError::Blank { field });
        }
        Ok(buffer)
    }

    /// Number of characters in the buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chars.len()
    }

    /// `true` if the buffer holds no characters at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// `true` if the buffer is empty or holds only layout characters
    /// (whitespace, controls, zero-width formats).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|&c| is_layout(c))
    }

    /// Character at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }

    /// Last character in the buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    #[must_use]
    pub fn last_char(&self) -> char {
        *self.chars.last().expect("buffer is empty")
    }

    /// Overwrite the character at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set_char(&mut self, index: usize, c: char) -> &mut Self {
        self.chars[index] = c;
        self
    }

    /// Append a single character.
    pub fn push(&mut self, c: char) -> &mut Self {
        self.chars.push(c);
        self
    }

    /// Append a string.
    pub fn push_str(&mut self, s: &str) -> &mut Self {
        self.chars.extend(s.chars());
        self
    }

    /// Append the contents of another buffer.
    pub fn push_buffer(&mut self, other: &Self) -> &mut Self {
        self.chars.extend_from_slice(&other.chars);
        self
    }

    /// Insert a character before position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, c: char) -> &mut Self {
        self.chars.insert(index, c);
        self
    }

    /// Insert a string before position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_str(&mut self, index: usize, s: &str) -> &mut Self {
        assert!(index <= self.chars.len(), "index={index} out of bounds");
        self.chars.splice(index..index, s.chars());
        self
    }

    /// Remove the characters in `[start, end)`. `end` is clamped to the
    /// length, so deleting "through the end" needs no length arithmetic.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` (after clamping) or `start > len()`.
    pub fn delete(&mut self, start: usize, end: usize) -> &mut Self {
        let end = end.min(self.chars.len());
        assert!(start <= end, "start={start}, end={end}");
        self.chars.drain(start..end);
        self
    }

    /// Remove the character at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn delete_at(&mut self, index: usize) -> &mut Self {
        self.chars.remove(index);
        self
    }

    /// Remove the last character.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn delete_last(&mut self) -> &mut Self {
        assert!(!self.chars.is_empty(), "buffer is empty");
        self.chars.pop();
        self
    }

    /// Index of the first occurrence of `c`, if any.
    #[must_use]
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&x| x == c)
    }

    /// Index of the first occurrence of the subsequence `needle`, if any.
    /// An empty needle never matches.
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<usize> {
        let needle: Vec<char> = needle.chars().collect();
        if needle.is_empty() || needle.len() > self.chars.len() {
            return None;
        }
        self.chars
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
    }

    /// `true` if the buffer contains the character `c`.
    #[must_use]
    pub fn contains_char(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    /// First of the `candidates` that occurs anywhere in the buffer, in
    /// candidate order, if any.
    #[must_use]
    pub fn first_of(&self, candidates: &[char]) -> Option<char> {
        candidates.iter().copied().find(|&c| self.contains_char(c))
    }

    /// Replace every occurrence of `target` with `replacement`.
    pub fn replace_char(&mut self, target: char, replacement: char) -> &mut Self {
        for c in &mut self.chars {
            if *c == target {
                *c = replacement;
            }
        }
        self
    }

    /// Replace every occurrence of the subsequence `target` with
    /// `replacement`. Replacements are not rescanned. An empty target makes
    /// no change.
    pub fn replace(&mut self, target: &str, replacement: &str) -> &mut Self {
        let target: Vec<char> = target.chars().collect();
        if target.is_empty() {
            return self;
        }
        let replacement: Vec<char> = replacement.chars().collect();
        let mut i = 0;
        while i + target.len() <= self.chars.len() {
            if self.chars[i..i + target.len()] == target[..] {
                self.chars
                    .splice(i..i + target.len(), replacement.iter().copied());
                i += replacement.len();
            } else {
                i += 1;
            }
        }
        self
    }

    /// A new buffer holding the characters in `[start, end)`. `end` is
    /// clamped to the length.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` after clamping.
    #[must_use]
    pub fn sub(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.chars.len());
        assert!(start <= end, "start={start}, end={end}");
        Self {
            chars: self.chars[start..end].to_vec(),
        }
    }

    /// Split around matches of `delimiter`. The delimiter is consumed;
    /// interior empty pieces are kept; a trailing empty piece is dropped.
    #[must_use]
    pub fn split(&self, delimiter: &str) -> Vec<Self> {
        const SENTINEL: char = '\u{FFFF}';
        let mut scratch = self.clone();
        scratch.replace(delimiter, &SENTINEL.to_string());
        let mut pieces = Vec::new();
        while let Some(i) = scratch.index_of(SENTINEL) {
            pieces.push(scratch.sub(0, i));
            scratch.delete(0, i + 1);
        }
        if !scratch.is_empty() {
            pieces.push(scratch);
        }
        pieces
    }

    /// Delete layout characters at both ends of the buffer.
    pub fn trim(&mut self) -> &mut Self {
        while self.chars.first().copied().is_some_and(is_layout) {
            self.chars.remove(0);
        }
        while self.chars.last().copied().is_some_and(is_layout) {
            self.chars.pop();
        }
        self
    }

    /// Strip whitespace, with optional title processing.
    ///
    /// Without `title`, every layout character is removed. With `title`,
    /// interior runs collapse to a single space, letters are lowercased,
    /// and the first letter of the buffer and any letter following
    /// whitespace, a dash, or other joining punctuation is title-cased.
    pub fn edit_whitespace(&mut self, title: bool) -> &mut Self {
        // Pretend the character before the buffer was whitespace so the
        // first real character gets title-cased.
        let mut current_white = title;
        let mut make_title = false;
        let mut i = 0;
        while i < self.chars.len() {
            let previous_white = current_white;
            make_title |= previous_white;
            let c = self.chars[i];
            current_white = is_layout(c);
            if current_white {
                self.chars.remove(i);
            } else {
                if title {
                    if previous_white && i != 0 {
                        self.chars.insert(i, ' ');
                        i += 1;
                    }
                    self.chars[i] = if make_title { to_title(c) } else { to_lower(c) };
                    make_title = is_joining_punctuation(c);
                }
                i += 1;
            }
        }
        self
    }

    /// Insert one marker character before each of the given ascending
    /// `places`, cycling through the `insertions` sequence. Each insertion
    /// shifts the later places by one, which is accounted for. Decoration
    /// stops at the first place that falls at or past the current end.
    ///
    /// # Panics
    ///
    /// Panics if `insertions` is empty while a place is in range.
    pub fn decorate(&mut self, insertions: &str, places: &[usize]) -> &mut Self {
        let marks: Vec<char> = insertions.chars().collect();
        let mut next = 0;
        let mut inserted = 0;
        for &place in places {
            let position = place + inserted;
            if position >= self.chars.len() {
                break;
            }
            self.insert(position, marks[next]);
            inserted += 1;
            next = (next + 1) % marks.len();
        }
        self
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_primitives() {
        let mut bb = TextBuffer::from("hello");
        bb.insert(0, 'x').push('!').delete_at(1);
        assert_eq!(bb.to_string(), "xello!");
        bb.delete(1, 100);
        assert_eq!(bb.to_string(), "x");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_panics() {
        let mut bb = TextBuffer::from("ab");
        bb.insert_str(5, "x");
    }

    #[test]
    fn search() {
        let bb = TextBuffer::from("boo:and:foo");
        assert_eq!(bb.index_of(':'), Some(3));
        assert_eq!(bb.find("and"), Some(4));
        assert_eq!(bb.find("zebra"), None);
        assert_eq!(bb.first_of(&['x', 'n', 'o']), Some('n'));
        assert_eq!(bb.first_of(&['x', 'y']), None);
    }

    #[test]
    fn replace_does_not_rescan() {
        let mut bb = TextBuffer::from("aaa");
        bb.replace("aa", "a");
        assert_eq!(bb.to_string(), "aa");
        let mut bb = TextBuffer::from("ab");
        bb.replace("b", "bb");
        assert_eq!(bb.to_string(), "abb");
    }

    #[test]
    fn split_consumes_delimiter_and_drops_trailing_empty() {
        let bb = TextBuffer::from("boo:and:foo");
        let pieces = bb.split(":");
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[1].to_string(), "and");

        let pieces = TextBuffer::from("a@@b").split("@");
        assert_eq!(pieces.len(), 3);
        assert!(pieces[1].is_empty());

        let pieces = TextBuffer::from("a@").split("@");
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn trim_and_blank() {
        let mut bb = TextBuffer::from("\t  x \u{200B}\n");
        bb.trim();
        assert_eq!(bb.to_string(), "x");
        assert!(TextBuffer::from(" \u{FEFF}\t").is_blank());
        assert!(!TextBuffer::from(" a ").is_blank());
    }

    #[test]
    fn whitespace_stripping() {
        let mut bb = TextBuffer::from(" a b\tc ");
        bb.edit_whitespace(false);
        assert_eq!(bb.to_string(), "abc");
    }

    #[test]
    fn title_casing() {
        let mut bb = TextBuffer::from("  joHN\t  q.   pUBLIC ");
        bb.edit_whitespace(true);
        assert_eq!(bb.to_string(), "John Q. Public");

        let mut bb = TextBuffer::from("mary-jane o'brien");
        bb.edit_whitespace(true);
        assert_eq!(bb.to_string(), "Mary-Jane O'Brien");
    }

    #[test]
    fn decorate_cycles_and_shifts() {
        let mut bb = TextBuffer::from("123456789");
        bb.decorate("-", &[3, 5]);
        assert_eq!(bb.to_string(), "123-45-6789");

        let mut bb = TextBuffer::from("+12125550100");
        bb.decorate("()-", &[2, 5, 8]);
        assert_eq!(bb.to_string(), "+1(212)555-0100");
    }

    #[test]
    fn decorate_stops_past_the_end() {
        let mut bb = TextBuffer::from("12345678");
        bb.decorate("-", &[4, 8, 12, 16]);
        assert_eq!(bb.to_string(), "1234-5678");
    }

    #[test]
    fn ensure_content_rejects_blank() {
        assert!(TextBuffer::ensure_content("", "thing", false).is_err());
        assert!(TextBuffer::ensure_content("   ", "thing", true).is_err());
        let bb = TextBuffer::ensure_content(" 1 2 ", "thing", true).unwrap();
        assert_eq!(bb.to_string(), "12");
    }
}
