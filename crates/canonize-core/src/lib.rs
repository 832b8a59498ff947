//! Core library for canonize.
//!
//! This crate provides the validation and normalization engine used by the
//! `canonize` CLI and any downstream consumers. Each validator accepts
//! free-form text and returns a [`Valid`] triple — a canonical typed
//! `machine` value, a conventional `common` rendering, and a `particular`
//! rendering that regularizes the input's own style — or a
//! [`ValidationError`] naming exactly what was wrong.
//!
//! # Modules
//!
//! - [`buffer`] - The editable character buffer the validators share
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`number`] - Numeric token scanning and rendering helpers
//! - [`ranges`] - ISBN registration-group range data
//! - [`valid`] - The uniform success value
//! - [`validators`] - One module per validated value kind
//! - [`verify`] - Range and rounding checks shared by the numeric kinds
//!
//! # Quick Start
//!
//! ```
//! use canonize_core::validate_ssn;
//!
//! let result = validate_ssn("123 45 6789").expect("well-formed SSN");
//! assert_eq!(result.machine, "123456789");
//! assert_eq!(result.common, "123-45-6789");
//! ```
//!
//! Re-validating either rendering of a successful result yields the same
//! `machine` value, so stored canonical forms survive a round trip through
//! any edit field that calls back into the same validator.
#![deny(unsafe_code)]

pub mod buffer;

pub mod config;

pub mod error;

pub mod number;

pub mod ranges;

pub mod valid;

pub mod validators;

pub mod verify;

pub use buffer::TextBuffer;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult, RangeDataError, ValidationError, ValidationResult};

pub use ranges::{Placement, RANGE_MESSAGE_URL, RangeIndex, shared_index};

pub use valid::Valid;

pub use validators::{
    ALL_KINDS, IsbnKind, validate_credit_card, validate_currency, validate_date, validate_double,
    validate_email, validate_integer, validate_isbn, validate_isbn_with, validate_name,
    validate_percentage, validate_phone, validate_ssn,
};
