//! Numeric commands: integer, double, currency, percentage.

use camino::Utf8PathBuf;
use clap::Args;
use rust_decimal::Decimal;
use tracing::instrument;

use canonize_core::{
    Config, validate_currency, validate_double, validate_integer, validate_percentage,
};

use super::run;

/// Arguments for the `integer` subcommand.
#[derive(Args, Debug)]
pub struct IntegerArgs {
    /// Value to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Inclusive minimum.
    #[arg(long)]
    pub min: Option<i64>,

    /// Inclusive maximum.
    #[arg(long)]
    pub max: Option<i64>,
}

/// Validate whole numbers.
#[instrument(name = "cmd_integer", skip_all)]
pub fn cmd_integer(args: IntegerArgs, json: bool) -> anyhow::Result<()> {
    let min = args.min.unwrap_or(i64::MIN);
    let max = args.max.unwrap_or(i64::MAX);
    run(args.value, args.file.as_deref(), json, |input| {
        validate_integer(input, min, max)
    })
}

/// Arguments for the `double` subcommand.
#[derive(Args, Debug)]
pub struct DoubleArgs {
    /// Value to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Inclusive minimum.
    #[arg(long)]
    pub min: Option<f64>,

    /// Inclusive maximum.
    #[arg(long)]
    pub max: Option<f64>,

    /// Round to this many significant digits (0 keeps full precision).
    #[arg(long)]
    pub digits: Option<u32>,
}

/// Validate floating-point numbers.
#[instrument(name = "cmd_double", skip_all)]
pub fn cmd_double(args: DoubleArgs, json: bool, config: &Config) -> anyhow::Result<()> {
    let min = args.min.unwrap_or(f64::NEG_INFINITY);
    let max = args.max.unwrap_or(f64::INFINITY);
    let digits = args.digits.unwrap_or(config.double_digits);
    run(args.value, args.file.as_deref(), json, |input| {
        validate_double(input, min, max, digits)
    })
}

/// Arguments for the `currency` subcommand.
#[derive(Args, Debug)]
pub struct CurrencyArgs {
    /// Amount to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Inclusive minimum amount.
    #[arg(long)]
    pub min: Option<Decimal>,

    /// Inclusive maximum amount.
    #[arg(long)]
    pub max: Option<Decimal>,

    /// Decimal places to allow and render (0 disables the check).
    #[arg(long)]
    pub decimals: Option<u32>,
}

/// Validate currency amounts.
#[instrument(name = "cmd_currency", skip_all)]
pub fn cmd_currency(args: CurrencyArgs, json: bool, config: &Config) -> anyhow::Result<()> {
    let decimals = args.decimals.unwrap_or(config.currency_decimals);
    run(args.value, args.file.as_deref(), json, |input| {
        validate_currency(input, args.min.as_ref(), args.max.as_ref(), decimals)
    })
}

/// Arguments for the `percentage` subcommand.
#[derive(Args, Debug)]
pub struct PercentageArgs {
    /// Percentage to validate.
    pub value: Option<String>,

    /// Validate each non-blank line of a file instead.
    #[arg(long, conflicts_with = "value")]
    pub file: Option<Utf8PathBuf>,

    /// Inclusive minimum, as a fraction (0.5 means 50%).
    #[arg(long)]
    pub min: Option<f64>,

    /// Inclusive maximum, as a fraction.
    #[arg(long)]
    pub max: Option<f64>,

    /// Significant digits in the rendered percentage.
    #[arg(long)]
    pub digits: Option<u32>,
}

/// Validate percentages.
#[instrument(name = "cmd_percentage", skip_all)]
pub fn cmd_percentage(args: PercentageArgs, json: bool, config: &Config) -> anyhow::Result<()> {
    let min = args.min.unwrap_or(f64::NEG_INFINITY);
    let max = args.max.unwrap_or(f64::INFINITY);
    let digits = args.digits.unwrap_or(config.percentage_digits);
    run(args.value, args.file.as_deref(), json, |input| {
        validate_percentage(input, min, max, digits)
    })
}
