//! One validator per value kind.
//!
//! Each validator is a pure function from raw text (plus kind-specific
//! constraints) to a [`Valid`](crate::valid::Valid) triple or a
//! [`ValidationError`](crate::error::ValidationError). No validator calls
//! another; they share only the buffer, scanning, and range-check
//! machinery.

pub mod credit_card;
pub mod currency;
pub mod date;
pub mod double;
pub mod email;
pub mod integer;
pub mod isbn;
pub mod name;
pub mod percentage;
pub mod phone;
pub mod ssn;

pub use credit_card::validate_credit_card;
pub use currency::validate_currency;
pub use date::validate_date;
pub use double::validate_double;
pub use email::validate_email;
pub use integer::validate_integer;
pub use isbn::{IsbnKind, validate_isbn, validate_isbn_with};
pub use name::validate_name;
pub use percentage::validate_percentage;
pub use phone::validate_phone;
pub use ssn::validate_ssn;

/// Every value kind the engine validates, in alphabetical order.
pub const ALL_KINDS: &[&str] = &[
    "credit-card",
    "currency",
    "date",
    "double",
    "email",
    "integer",
    "isbn",
    "name",
    "percentage",
    "phone",
    "ssn",
];
