//! canonize CLI
#![deny(unsafe_code)]

use anyhow::Context;
use canonize::{Cli, Commands, commands};
use canonize_core::ConfigLoader;
use clap::Parser;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        loader = loader.with_file(config_path);
    }
    let config = loader.load().context("failed to load configuration")?;

    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    observability::init(env_filter);

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        "CLI initialized"
    );

    let result = match cli.command {
        Commands::Integer(args) => commands::number::cmd_integer(args, cli.json),
        Commands::Double(args) => commands::number::cmd_double(args, cli.json, &config),
        Commands::Currency(args) => commands::number::cmd_currency(args, cli.json, &config),
        Commands::Percentage(args) => commands::number::cmd_percentage(args, cli.json, &config),
        Commands::Date(args) => commands::date::cmd_date(args, cli.json),
        Commands::Name(args) => commands::name::cmd_name(args, cli.json),
        Commands::Email(args) => commands::email::cmd_email(args, cli.json),
        Commands::Phone(args) => commands::phone::cmd_phone(args, cli.json, &config),
        Commands::Ssn(args) => commands::codes::cmd_ssn(args, cli.json),
        Commands::CreditCard(args) => commands::codes::cmd_credit_card(args, cli.json),
        Commands::Isbn(args) => commands::codes::cmd_isbn(args, cli.json, &config),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
