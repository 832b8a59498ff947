//! Error types for canonize-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    NotFound(String),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure to obtain or interpret the external ISBN range document.
///
/// Deliberately a separate chain from [`ValidationError`]: a structurally
/// invalid ISBN and unavailable reference data are different problems.
#[derive(Error, Debug)]
pub enum RangeDataError {
    /// The range document could not be fetched.
    #[error("range document not available")]
    Fetch(#[source] reqwest::Error),

    /// The range document could not be deserialized.
    #[error("range document not parsed")]
    Parse(#[source] quick_xml::DeError),

    /// The document deserialized but its fields do not hold what they must.
    #[error("range document malformed: {0}")]
    Malformed(String),
}

/// The single failure taxonomy shared by every validator.
///
/// Validators never recover internally: the first violation raises one of
/// these and the caller decides whether to retry with corrected input.
/// Out-of-bounds buffer access is a programmer error and panics instead.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Input was absent or blank.
    #[error("no {field} present")]
    Blank {
        /// What the input was supposed to contain.
        field: &'static str,
    },

    /// Characters that may not appear in the input, each reported once.
    #[error("character(s) {found:?} may not appear within {input:?}")]
    Disallowed {
        /// Every offending character, in order of first appearance.
        found: String,
        /// The original input.
        input: String,
    },

    /// Characters not permitted in a structural part of the value.
    #[error("character(s) {found:?} not permitted in {part}")]
    DisallowedIn {
        /// Every offending character, in order of first appearance.
        found: String,
        /// Which part of the value they appeared in.
        part: &'static str,
    },

    /// Fewer digits than the value kind requires.
    #[error("{kind} {input:?} has insufficient digits")]
    TooFewDigits {
        /// The kind of value being validated.
        kind: &'static str,
        /// The original input.
        input: String,
    },

    /// More digits than the value kind permits.
    #[error("{kind} {input:?} contains too many digits")]
    TooManyDigits {
        /// The kind of value being validated.
        kind: &'static str,
        /// The original input.
        input: String,
    },

    /// A digit count that must match exactly did not.
    #[error("{given} digit(s) given but {required} needed")]
    DigitCount {
        /// How many digits the input held.
        given: usize,
        /// How many were needed.
        required: usize,
    },

    /// The check digit or checksum does not match.
    #[error("{kind} {input:?} has an incorrect check sum")]
    Checksum {
        /// The kind of value being validated.
        kind: &'static str,
        /// The original input.
        input: String,
    },

    /// Value below the requested minimum.
    #[error("value \"{value}\" lower than {minimum}")]
    BelowMinimum {
        /// The offending value, rendered.
        value: String,
        /// The inclusive minimum, rendered.
        minimum: String,
    },

    /// Value above the requested maximum.
    #[error("value \"{value}\" higher than {maximum}")]
    AboveMaximum {
        /// The offending value, rendered.
        value: String,
        /// The inclusive maximum, rendered.
        maximum: String,
    },

    /// The input survived scanning but is not a parseable literal.
    #[error("{kind} {input:?} not understood")]
    Unparseable {
        /// The kind of literal expected.
        kind: &'static str,
        /// The original input.
        input: String,
        /// The underlying parse failure, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A currency input carried more decimal places than requested.
    #[error("decimal digits ({scale}) more than {decimals}")]
    ScaleExceeded {
        /// Decimal places present in the input.
        scale: u32,
        /// Decimal places permitted.
        decimals: u32,
    },

    /// A quoted escape in an email address never closes.
    #[error("unterminated quoted escape")]
    UnterminatedQuote,

    /// A bracketing delimiter appears without its partner, or out of order.
    #[error("'{open}' or '{close}' present but not matched")]
    Unmatched {
        /// Opening delimiter.
        open: char,
        /// Closing delimiter.
        close: char,
    },

    /// An email address must contain exactly one `@` separator.
    #[error("missing, or too many, @ symbols")]
    AtSignCount,

    /// A dot at the edge of, or doubled within, an email address part.
    #[error("'.' not permitted in {part:?} at character {position}")]
    DotPlacement {
        /// The offending part, after normalization.
        part: String,
        /// Position just past the offending dot.
        position: usize,
    },

    /// An email domain must contain at least one dot.
    #[error("domain must contain at least one '.'")]
    MissingDomainDot,

    /// A length ceiling was exceeded.
    #[error("{what} length {length} longer than {limit}")]
    TooLong {
        /// Which part is too long.
        what: &'static str,
        /// Its length.
        length: usize,
        /// The ceiling.
        limit: usize,
    },

    /// The phone region is outside the supported numbering plans.
    #[error("region {region:?} not supported for phone numbers")]
    UnsupportedRegion {
        /// The region that was requested.
        region: String,
    },

    /// A `+` country-code flag was present but the code did not follow.
    #[error("country code not found")]
    MissingCountryCode,

    /// The first character of a name must be a letter.
    #[error("{input:?} does not start like a name")]
    NotAName {
        /// The original input.
        input: String,
    },

    /// An ISBN body must hold 9 or 12 digits before the check character.
    #[error("ISBN {input:?} not of permissible length")]
    IsbnLength {
        /// The original input.
        input: String,
    },

    /// No registration-group range rule matches the ISBN prefix.
    #[error("ISBN {input:?} contains invalid sequence")]
    IsbnPrefix {
        /// The original input.
        input: String,
    },

    /// The external range document could not be obtained or understood.
    #[error("ISBN range data unavailable")]
    RangeData(#[from] RangeDataError),
}

/// Result type alias using [`ValidationError`].
pub type ValidationResult<T> = Result<T, ValidationError>;
