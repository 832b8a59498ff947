//! Date command.

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Args;
use tracing::instrument;

use canonize_core::validate_date;

use super::run;

/// Arguments for the `date` subcommand.
#[derive(Args, Debug)]
pub struct DateArgs {
    /// Date to validate, in any recognized format.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Inclusive earliest date (ISO form).
    #[arg(long)]
    pub min: Option<NaiveDate>,

    /// Inclusive latest date (ISO form).
    #[arg(long)]
    pub max: Option<NaiveDate>,
}

/// Validate calendar dates.
#[instrument(name = "cmd_date", skip_all)]
pub fn cmd_date(args: DateArgs, json: bool) -> anyhow::Result<()> {
    run(args.value, args.file.as_deref(), json, |input| {
        validate_date(input, args.min, args.max)
    })
}
