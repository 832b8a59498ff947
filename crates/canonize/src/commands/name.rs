//! Name command.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::instrument;

use canonize_core::validate_name;

use super::run;

/// Arguments for the `name` subcommand.
#[derive(Args, Debug)]
pub struct NameArgs {
    /// Name to normalize.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Leave single-letter sequences alone instead of rewriting them
    /// as dotted abbreviations.
    #[arg(long)]
    pub no_abbreviation: bool,
}

/// Normalize whitespace and abbreviation dots in personal names.
#[instrument(name = "cmd_name", skip_all)]
pub fn cmd_name(args: NameArgs, json: bool) -> anyhow::Result<()> {
    run(args.value, args.file.as_deref(), json, |value| {
        validate_name(value, !args.no_abbreviation)
    })
}
