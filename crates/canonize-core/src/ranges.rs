//! ISBN registration-group range data.
//!
//! The International ISBN Agency publishes a RangeMessage XML document
//! describing, per registration group, which publisher-code ranges are
//! assigned and how long the publisher segment is within each range. That
//! document is what makes correct ISBN hyphenation possible; without it a
//! 13-digit string cannot be broken into its elements.
//!
//! [`RangeIndex`] is the parsed, queryable form. [`shared_index`] holds a
//! process-wide copy fetched at most once; a fetch failure leaves the
//! cache empty so a later call can retry.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;

use crate::error::RangeDataError;

/// Where the International ISBN Agency publishes the range document.
pub const RANGE_MESSAGE_URL: &str = "https://www.isbn-international.org/export_rangemessage.xml";

#[derive(Debug, Deserialize)]
#[serde(rename = "ISBNRangeMessage")]
struct RangeMessage {
    #[serde(rename = "RegistrationGroups")]
    registration_groups: RegistrationGroups,
}

#[derive(Debug, Deserialize)]
struct RegistrationGroups {
    #[serde(rename = "Group", default)]
    groups: Vec<GroupXml>,
}

#[derive(Debug, Deserialize)]
struct GroupXml {
    #[serde(rename = "Prefix")]
    prefix: String,
    #[serde(rename = "Rules")]
    rules: RulesXml,
}

#[derive(Debug, Deserialize)]
struct RulesXml {
    #[serde(rename = "Rule", default)]
    rules: Vec<RuleXml>,
}

#[derive(Debug, Deserialize)]
struct RuleXml {
    #[serde(rename = "Range")]
    range: String,
    #[serde(rename = "Length")]
    length: usize,
}

/// One assigned publisher-code range within a registration group.
///
/// Bounds are the leading `length` characters of the document's 7-digit
/// range halves, compared lexicographically.
#[derive(Debug, Clone)]
struct RangeRule {
    length: usize,
    lower: String,
    upper: String,
}

/// One registration group: an EAN prefix plus the group digits that
/// follow it, and the publisher ranges assigned within.
#[derive(Debug, Clone)]
struct RangeGroup {
    prefix: String,
    leader: String,
    rules: Vec<RangeRule>,
}

/// How a 13-digit ISBN breaks into its leading elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Length of the EAN prefix element (978 or 979).
    pub prefix_len: usize,
    /// Length of the registration-group element.
    pub leader_len: usize,
    /// Length of the publisher-code element.
    pub segment_len: usize,
}

/// The parsed range document, queryable by ISBN body.
#[derive(Debug, Clone)]
pub struct RangeIndex {
    groups: Vec<RangeGroup>,
}

impl RangeIndex {
    /// Parse a RangeMessage document.
    ///
    /// Groups whose prefix is not of the `978-0` shape, and rules whose
    /// range halves are not digit strings, are rejected outright. Rules
    /// with a zero length mark unassigned territory and are skipped.
    pub fn from_xml(document: &str) -> Result<Self, RangeDataError> {
        let message: RangeMessage =
            quick_xml::de::from_str(document).map_err(RangeDataError::Parse)?;

        let mut groups = Vec::with_capacity(message.registration_groups.groups.len());
        for group in message.registration_groups.groups {
            let (prefix, leader) = group.prefix.split_once('-').ok_or_else(|| {
                RangeDataError::Malformed(format!("group prefix {:?} lacks a dash", group.prefix))
            })?;
            if prefix.is_empty() || leader.is_empty() {
                return Err(RangeDataError::Malformed(format!(
                    "group prefix {:?} has an empty element",
                    group.prefix
                )));
            }

            let mut rules = Vec::new();
            for rule in group.rules.rules {
                if rule.length == 0 {
                    continue;
                }
                let (lower, upper) = rule.range.split_once('-').ok_or_else(|| {
                    RangeDataError::Malformed(format!("rule range {:?} lacks a dash", rule.range))
                })?;
                if rule.length > lower.len()
                    || rule.length > upper.len()
                    || !lower.bytes().all(|b| b.is_ascii_digit())
                    || !upper.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(RangeDataError::Malformed(format!(
                        "rule range {:?} not usable at length {}",
                        rule.range, rule.length
                    )));
                }
                rules.push(RangeRule {
                    length: rule.length,
                    lower: lower[..rule.length].to_string(),
                    upper: upper[..rule.length].to_string(),
                });
            }

            groups.push(RangeGroup {
                prefix: prefix.to_string(),
                leader: leader.to_string(),
                rules,
            });
        }

        if groups.is_empty() {
            return Err(RangeDataError::Malformed(
                "document holds no registration groups".to_string(),
            ));
        }
        Ok(Self { groups })
    }

    /// Fetch and parse the range document from the agency endpoint.
    pub fn fetch() -> Result<Self, RangeDataError> {
        Self::fetch_from(RANGE_MESSAGE_URL)
    }

    /// Fetch and parse the range document from an explicit URL.
    #[tracing::instrument]
    pub fn fetch_from(url: &str) -> Result<Self, RangeDataError> {
        tracing::info!("fetching ISBN range document");
        let document = reqwest::blocking::get(url)
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(RangeDataError::Fetch)?;
        let index = Self::from_xml(&document)?;
        tracing::info!(groups = index.groups.len(), "range document loaded");
        Ok(index)
    }

    /// Find the element placement for the body of a 13-digit ISBN (the
    /// first 12 digits, check digit excluded). Returns `None` when no
    /// assigned range covers the body.
    #[must_use]
    pub fn lookup(&self, body: &str) -> Option<Placement> {
        for group in &self.groups {
            let leader_end = group.prefix.len() + group.leader.len();
            if leader_end >= body.len()
                || !body.starts_with(group.prefix.as_str())
                || !body[group.prefix.len()..].starts_with(group.leader.as_str())
            {
                continue;
            }
            let remainder = &body[leader_end..];
            for rule in &group.rules {
                if rule.length > remainder.len() {
                    continue;
                }
                let segment = &remainder[..rule.length];
                if rule.lower.as_str() <= segment && segment <= rule.upper.as_str() {
                    return Some(Placement {
                        prefix_len: group.prefix.len(),
                        leader_len: group.leader.len(),
                        segment_len: rule.length,
                    });
                }
            }
        }
        None
    }
}

static SHARED: Mutex<Option<Arc<RangeIndex>>> = Mutex::new(None);

/// The process-wide range index, fetched on first use.
///
/// A successful fetch is cached for the life of the process. A failed
/// fetch leaves the cache empty, so the next caller tries again.
pub fn shared_index() -> Result<Arc<RangeIndex>, RangeDataError> {
    let mut slot = SHARED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(ref index) = *slot {
        return Ok(Arc::clone(index));
    }
    let index = Arc::new(RangeIndex::fetch()?);
    *slot = Some(Arc::clone(&index));
    Ok(index)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A trimmed RangeMessage covering the English-language group, enough
    /// for hyphenating the 978-0 test ISBNs.
    pub(crate) const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ISBNRangeMessage>
  <MessageSource>International ISBN Agency</MessageSource>
  <RegistrationGroups>
    <Group>
      <Prefix>978-0</Prefix>
      <Agency>English language</Agency>
      <Rules>
        <Rule>
          <Range>0000000-1999999</Range>
          <Length>2</Length>
        </Rule>
        <Rule>
          <Range>2000000-2279999</Range>
          <Length>3</Length>
        </Rule>
        <Rule>
          <Range>2280000-2289999</Range>
          <Length>0</Length>
        </Rule>
        <Rule>
          <Range>3000000-6399999</Range>
          <Length>3</Length>
        </Rule>
        <Rule>
          <Range>6400000-6479999</Range>
          <Length>7</Length>
        </Rule>
        <Rule>
          <Range>9990000-9999999</Range>
          <Length>4</Length>
        </Rule>
      </Rules>
    </Group>
    <Group>
      <Prefix>979-8</Prefix>
      <Agency>United States</Agency>
      <Rules>
        <Rule>
          <Range>4000000-8499999</Range>
          <Length>4</Length>
        </Rule>
      </Rules>
    </Group>
  </RegistrationGroups>
</ISBNRangeMessage>
"#;

    pub(crate) fn fixture_index() -> RangeIndex {
        RangeIndex::from_xml(FIXTURE).unwrap()
    }

    #[test]
    fn parses_groups_and_skips_zero_length_rules() {
        let index = fixture_index();
        assert_eq!(index.groups.len(), 2);
        assert_eq!(index.groups[0].prefix, "978");
        assert_eq!(index.groups[0].leader, "0");
        // Six rules in the document, one with length 0 skipped
        assert_eq!(index.groups[0].rules.len(), 5);
        assert_eq!(index.groups[0].rules[0].lower, "00");
        assert_eq!(index.groups[0].rules[0].upper, "19");
    }

    #[test]
    fn lookup_places_a_known_body() {
        let index = fixture_index();
        // 978-0-306-40615-? — publisher code 306 sits in 300..=639 at length 3
        let placement = index.lookup("978030640615").unwrap();
        assert_eq!(
            placement,
            Placement {
                prefix_len: 3,
                leader_len: 1,
                segment_len: 3,
            }
        );
    }

    #[test]
    fn lookup_rejects_unassigned_territory() {
        let index = fixture_index();
        // Publisher territory 228 has length 0 in the document
        assert!(index.lookup("978022800000").is_none());
        // Wrong registration group entirely
        assert!(index.lookup("978712345678").is_none());
    }

    #[test]
    fn malformed_documents_are_refused() {
        let no_groups = r"<ISBNRangeMessage><RegistrationGroups></RegistrationGroups></ISBNRangeMessage>";
        assert!(matches!(
            RangeIndex::from_xml(no_groups),
            Err(RangeDataError::Malformed(_))
        ));

        let bad_prefix = r"<ISBNRangeMessage><RegistrationGroups><Group><Prefix>9780</Prefix><Rules><Rule><Range>0000000-1999999</Range><Length>2</Length></Rule></Rules></Group></RegistrationGroups></ISBNRangeMessage>";
        assert!(matches!(
            RangeIndex::from_xml(bad_prefix),
            Err(RangeDataError::Malformed(_))
        ));
    }
}
