//! Email command.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::instrument;

use canonize_core::validate_email;

use super::run;

/// Arguments for the `email` subcommand.
#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Address to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,
}

/// Validate email addresses, stripping comments and display names.
#[instrument(name = "cmd_email", skip_all)]
pub fn cmd_email(args: EmailArgs, json: bool) -> anyhow::Result<()> {
    run(args.value, args.file.as_deref(), json, validate_email)
}
