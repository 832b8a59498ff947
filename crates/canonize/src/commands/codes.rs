//! Identification-code commands: ssn, credit-card, isbn.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::instrument;

use canonize_core::{
    Config, IsbnKind, RangeIndex, validate_credit_card, validate_isbn, validate_isbn_with,
    validate_ssn,
};

use super::run;

/// Arguments for the `ssn` subcommand.
#[derive(Args, Debug)]
pub struct SsnArgs {
    /// Number to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,
}

/// Validate Social Security numbers.
#[instrument(name = "cmd_ssn", skip_all)]
pub fn cmd_ssn(args: SsnArgs, json: bool) -> anyhow::Result<()> {
    run(args.value, args.file.as_deref(), json, validate_ssn)
}

/// Arguments for the `credit-card` subcommand.
#[derive(Args, Debug)]
pub struct CreditCardArgs {
    /// Number to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,
}

/// Validate credit card numbers against the Luhn checksum.
#[instrument(name = "cmd_credit_card", skip_all)]
pub fn cmd_credit_card(args: CreditCardArgs, json: bool) -> anyhow::Result<()> {
    run(args.value, args.file.as_deref(), json, validate_credit_card)
}

/// Arguments for the `isbn` subcommand.
#[derive(Args, Debug)]
pub struct IsbnArgs {
    /// ISBN to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Convert to this form (10 or 13); default keeps the input's form.
    #[arg(long, value_enum)]
    pub kind: Option<IsbnKind>,

    /// Fetch the range document from this URL instead of the agency's.
    #[arg(long, value_name = "URL")]
    pub range_url: Option<String>,
}

/// Validate ISBNs and hyphenate them at their registration boundaries.
///
/// The range document is fetched once per process; `--range-url` (or the
/// `isbn_range_url` config key) points the fetch somewhere else, useful
/// for mirrors and for offline test fixtures served locally.
#[instrument(name = "cmd_isbn", skip_all)]
pub fn cmd_isbn(args: IsbnArgs, json: bool, config: &Config) -> anyhow::Result<()> {
    let url = args.range_url.as_ref().or(config.isbn_range_url.as_ref());
    if let Some(url) = url {
        let index = RangeIndex::fetch_from(url)
            .with_context(|| format!("failed to load ISBN ranges from {url}"))?;
        run(args.value, args.file.as_deref(), json, |input| {
            validate_isbn_with(input, args.kind, &index)
        })
    } else {
        run(args.value, args.file.as_deref(), json, |input| {
            validate_isbn(input, args.kind)
        })
    }
}
