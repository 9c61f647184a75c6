use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use xliff_validator::config::{Args, Config, ConfigSources};
use xliff_validator::{validate, Outcome};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_str()),
    )
    .init();

    let file = args.file.clone();
    let mut format = args.format.unwrap_or_default();

    let outcome = match Config::from_args(args, &ConfigSources::from_env()) {
        Ok(config) => {
            format = config.format;
            Outcome::from(validate(&config.schema, &config.file))
        }
        Err(err) => Outcome::Failed(err),
    };

    match &outcome {
        Outcome::Valid => log::info!("{} is valid", file.display()),
        Outcome::Invalid(result) => log::info!(
            "{} failed validation with {} diagnostic(s)",
            file.display(),
            result.diagnostics.len()
        ),
        Outcome::Failed(err) => log::info!("validation of {} aborted: {err}", file.display()),
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(outcome.render(&file, format).as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write report to stdout")?;

    Ok(ExitCode::from(outcome.exit_code()))
}
