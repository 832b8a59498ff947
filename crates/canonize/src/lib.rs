//! Library interface for the `canonize` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a
//! library, primarily for documentation generation and testing. The actual
//! entry point is in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands, one per validated value kind
//! - [`commands`] - Command implementations

pub mod commands;

use camino::Utf8PathBuf;
use clap::{CommandFactory, Parser, Subcommand};

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                     Log filter (e.g., debug, canonize=trace)
    CANONIZE_REGION              Default phone region (NANP only)
    CANONIZE_CURRENCY_DECIMALS   Decimal places for currency amounts
    CANONIZE_PERCENTAGE_DIGITS   Significant digits for percentages
    CANONIZE_ISBN_RANGE_URL      Alternate ISBN range document URL
";

/// Command-line interface definition for canonize.
#[derive(Parser)]
#[command(name = "canonize")]
#[command(about = "Validate and normalize everyday textual values", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a whole number
    Integer(commands::number::IntegerArgs),

    /// Validate a floating-point number
    Double(commands::number::DoubleArgs),

    /// Validate a currency amount
    Currency(commands::number::CurrencyArgs),

    /// Validate a percentage
    Percentage(commands::number::PercentageArgs),

    /// Validate a calendar date
    Date(commands::date::DateArgs),

    /// Normalize whitespace in a personal name
    Name(commands::name::NameArgs),

    /// Validate an email address
    Email(commands::email::EmailArgs),

    /// Validate a telephone number
    Phone(commands::phone::PhoneArgs),

    /// Validate a Social Security number
    Ssn(commands::codes::SsnArgs),

    /// Validate a credit card number (Luhn)
    CreditCard(commands::codes::CreditCardArgs),

    /// Validate an ISBN against the registration ranges
    Isbn(commands::codes::IsbnArgs),

    /// Show package information and effective configuration
    Info(commands::info::InfoArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
