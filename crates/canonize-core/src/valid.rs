//! The uniform success value returned by every validator.

use serde::Serialize;

/// The three canonical representations of one validated value.
///
/// Constructed fresh by each successful validator call, immutable
/// afterwards, owned exclusively by the caller.
///
/// Invariant: re-validating `common` or `particular` as fresh input yields
/// a result with the same `machine` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valid<T> {
    /// Canonical typed value, usually the most compact representation.
    pub machine: T,
    /// The most conventional human-readable rendering.
    pub common: String,
    /// Rendering closest to the original input, but regularized.
    pub particular: String,
}

impl Valid<String> {
    /// A result whose three representations are all the same string.
    #[must_use]
    pub fn uniform(value: String) -> Self {
        Self {
            common: value.clone(),
            particular: value.clone(),
            machine: value,
        }
    }
}
