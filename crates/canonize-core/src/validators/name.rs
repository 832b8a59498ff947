//! Name standardization.

use crate::buffer::TextBuffer;
use crate::error::{ValidationError, ValidationResult};
use crate::valid::Valid;

/// Validate and standardize a name — of a person, place, organization,
/// or anything else named.
///
/// Whitespace runs collapse to single spaces; letters are lowercased
/// except the first of the string and any following whitespace or joining
/// punctuation, which are title-cased. With `abbreviation` set, a name
/// made of single letters separated by spaces or dots is read as an
/// abbreviation: separating spaces become dots and a trailing dot is
/// ensured. All three triple fields are the same string.
#[tracing::instrument(skip_all, fields(input = %input))]
pub fn validate_name(input: &str, abbreviation: bool) -> ValidationResult<Valid<String>> {
    let mut buffer = TextBuffer::ensure_content(input, "name", false)?;
    if !buffer.char_at(0).is_alphabetic() {
        return Err(ValidationError::NotAName {
            input: buffer.to_string(),
        });
    }
    buffer.edit_whitespace(true);

    let abbreviated = abbreviation
        && !buffer.is_empty()
        && (1..buffer.len())
            .step_by(2)
            .all(|i| matches!(buffer.char_at(i), ' ' | '.'));
    if abbreviated {
        buffer.replace_char(' ', '.');
        if buffer.last_char() != '.' {
            buffer.push('.');
        }
    }

    Ok(Valid::uniform(buffer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titlecases_and_collapses_whitespace() {
        let result = validate_name("joHN\t  q.   pUBLIC ", true).unwrap();
        assert_eq!(result.machine, "John Q. Public");
        assert_eq!(result.common, result.machine);
        assert_eq!(result.particular, result.machine);
    }

    #[test]
    fn joining_punctuation_restarts_title_case() {
        let result = validate_name("mary-jane o'brien", true).unwrap();
        assert_eq!(result.machine, "Mary-Jane O'Brien");
    }

    #[test]
    fn single_letters_become_an_abbreviation() {
        assert_eq!(validate_name("n a s a", true).unwrap().machine, "N.A.S.A.");
        assert_eq!(validate_name("n.a.s.a", true).unwrap().machine, "N.A.S.A.");
        assert_eq!(validate_name("n.a.s.a.", true).unwrap().machine, "N.A.S.A.");
    }

    #[test]
    fn abbreviation_rewrite_can_be_disabled() {
        assert_eq!(validate_name("n a s a", false).unwrap().machine, "N A S A");
        assert_eq!(validate_name("n.a.s.a", false).unwrap().machine, "N.A.S.A");
    }

    #[test]
    fn must_start_with_a_letter() {
        assert!(matches!(
            validate_name("123 Main", true),
            Err(ValidationError::NotAName { .. })
        ));
        assert!(matches!(
            validate_name(" leading space", true),
            Err(ValidationError::NotAName { .. })
        ));
    }

    #[test]
    fn blank_input_is_blank_not_nameless() {
        assert!(matches!(
            validate_name("   ", true),
            Err(ValidationError::Blank { field: "name" })
        ));
    }

    #[test]
    fn idempotent() {
        let first = validate_name("j r r tolkien", true).unwrap();
        let again = validate_name(&first.machine, true).unwrap();
        assert_eq!(again.machine, first.machine);
    }
}
