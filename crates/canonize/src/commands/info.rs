//! Info command implementation

use canonize_core::{ALL_KINDS, Config};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct FullInfo<'a> {
    #[serde(flatten)]
    package: PackageInfo,
    validators: &'static [&'static str],
    config: &'a Config,
}

/// Print package information, the available validators, and the effective
/// configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(_args: InfoArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        validators: ALL_KINDS,
        config,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
    } else {
        println!(
            "{} {}",
            full_info
                .package
                .name
                .if_supports_color(Stream::Stdout, |t| t.bold()),
            full_info
                .package
                .version
                .if_supports_color(Stream::Stdout, |t| t.green())
        );
        if !full_info.package.description.is_empty() {
            println!("{}", full_info.package.description);
        }
        println!();
        println!("{}", "Validators:".if_supports_color(Stream::Stdout, |t| t.bold()));
        for kind in full_info.validators {
            println!("  {kind}");
        }
        println!();
        println!("{}", "Configuration:".if_supports_color(Stream::Stdout, |t| t.bold()));
        println!("  log_level:            {}", config.log_level.as_str());
        println!("  region:               {}", config.region);
        println!("  require_country_code: {}", config.require_country_code);
        println!("  currency_decimals:    {}", config.currency_decimals);
        println!("  percentage_digits:    {}", config.percentage_digits);
        println!("  double_digits:        {}", config.double_digits);
        if let Some(ref url) = config.isbn_range_url {
            println!("  isbn_range_url:       {url}");
        }
    }

    Ok(())
}
