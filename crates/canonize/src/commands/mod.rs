//! Command implementations.

use anyhow::{Context, bail};
use camino::Utf8Path;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use canonize_core::{Valid, ValidationResult};

pub mod codes;
pub mod date;
pub mod email;
pub mod info;
pub mod name;
pub mod number;
pub mod phone;

/// One validated input, as emitted in JSON mode.
#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    input: &'a str,
    #[serde(flatten)]
    result: &'a Valid<T>,
}

/// One failed input in a batch, as emitted in JSON mode.
#[derive(Serialize)]
struct Failure<'a> {
    input: &'a str,
    error: String,
}

/// Drive a validator over either a single value or a file of them.
///
/// Every command funnels through here: a lone value propagates its error
/// directly, while `--file` validates each non-blank line, reports every
/// failure, and fails at the end if any line failed.
pub fn run<T, F>(
    value: Option<String>,
    file: Option<&Utf8Path>,
    json: bool,
    validate: F,
) -> anyhow::Result<()>
where
    T: Serialize + std::fmt::Display,
    F: Fn(&str) -> ValidationResult<Valid<T>>,
{
    match (value, file) {
        (Some(value), None) => {
            let result = validate(&value).with_context(|| format!("invalid input: {value}"))?;
            emit(&value, &result, json)
        }
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path.as_std_path())
                .with_context(|| format!("failed to read {path}"))?;
            let mut failures = 0usize;
            for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
                match validate(line) {
                    Ok(result) => emit(line, &result, json)?,
                    Err(err) => {
                        failures += 1;
                        if json {
                            let failure = Failure {
                                input: line,
                                error: err.to_string(),
                            };
                            eprintln!("{}", serde_json::to_string(&failure)?);
                        } else {
                            eprintln!(
                                "{} {line}: {err}",
                                "FAIL:".if_supports_color(Stream::Stderr, |t| t.red())
                            );
                        }
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} input(s) failed validation");
            }
            Ok(())
        }
        (Some(_), Some(_)) => bail!("provide a value or --file, not both"),
        (None, None) => bail!("provide a value to validate, or --file"),
    }
}

/// Print one successful result, as JSON or as labeled lines.
fn emit<T: Serialize + std::fmt::Display>(
    input: &str,
    result: &Valid<T>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let report = Report { input, result };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {}",
            "OK:".if_supports_color(Stream::Stdout, |t| t.green()),
            result.common
        );
        println!("  machine:    {}", result.machine);
        println!("  particular: {}", result.particular);
    }
    Ok(())
}
