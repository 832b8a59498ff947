//! Phone command.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::instrument;

use canonize_core::{Config, validate_phone};

use super::run;

/// Arguments for the `phone` subcommand.
#[derive(Args, Debug)]
pub struct PhoneArgs {
    /// Number to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Region the number belongs to (NANP regions only).
    #[arg(long)]
    pub region: Option<String>,

    /// Always include the country code in the particular rendering.
    #[arg(long)]
    pub require_country_code: bool,
}

/// Validate telephone numbers.
#[instrument(name = "cmd_phone", skip_all)]
pub fn cmd_phone(args: PhoneArgs, json: bool, config: &Config) -> anyhow::Result<()> {
    let region = args.region.as_deref().unwrap_or(&config.region).to_string();
    let required = args.require_country_code || config.require_country_code;
    run(args.value, args.file.as_deref(), json, |input| {
        validate_phone(input, required, Some(&region))
    })
}
