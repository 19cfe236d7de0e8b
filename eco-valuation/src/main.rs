#![warn(clippy::all)]
#![allow(clippy::pedantic)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};

use eco_common::config_loader::check_modular_files;
use eco_common::logging::init_logging_with_exclusions;
use eco_common::{Config, ReportFormat, Validate};
use eco_valuation::{ScenarioInput, ValuationError, ValuationReport};

/// Input errors, matching `eco_common::Error::InvalidInput`.
const EXIT_INVALID_INPUT: u8 = 65;
/// Configuration errors.
const EXIT_CONFIG: u8 = 78;

/// ESG-adjusted five-year DCF valuation.
#[derive(Parser, Debug)]
#[command(name = "eco-valuation")]
#[command(version)]
#[command(about = "Value a company with ESG-driven margin improvements phased into a five-year DCF.", long_about = None)]
struct Cli {
    /// Scenario JSON file (defaults to report.scenario_path, then built-in defaults)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Report format: markdown or json
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Skip the baseline comparison, margin trajectory and attribution
    #[arg(long)]
    no_baseline: bool,

    /// Config file (defaults to ~/.ecovaluate/config.json)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_logging_with_exclusions(
        &config.observability.log_level,
        &config.observability.log_format,
        &config.observability.excluded_targets,
    );

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Valuation failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(&expand(path))?;
            config.apply_env_overrides();
            config
        }
        None => Config::load_with_env()?,
    };
    config
        .validate()
        .map_err(|e| eco_common::Error::Config(e.to_string()))?;
    Ok(config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    for (file, present) in check_modular_files(None) {
        debug!(file = %file, present, "Config file");
    }

    let scenario_path = cli
        .scenario
        .as_deref()
        .map(expand)
        .or_else(|| config.report.expanded_scenario_path());

    let scenario = match &scenario_path {
        Some(path) => {
            info!(path = %path.display(), "Loading scenario");
            ScenarioInput::load(path)?
        }
        None => {
            info!("No scenario given, using defaults");
            ScenarioInput::default()
        }
    };
    let scenario = scenario.validated()?;

    let include_baseline = config.report.include_baseline && !cli.no_baseline;
    let format = cli.format.unwrap_or(config.report.format);

    let report = ValuationReport::build(&scenario, include_baseline)?;
    println!("{}", report.generate(format)?);

    Ok(())
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn exit_code(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<eco_common::Error>() {
        return u8::try_from(err.exit_code()).unwrap_or(1);
    }
    if e.downcast_ref::<ValuationError>().is_some() {
        return EXIT_INVALID_INPUT;
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "eco-valuation",
            "--scenario",
            "~/s.json",
            "--format",
            "json",
            "--no-baseline",
        ]);
        assert_eq!(cli.scenario.as_deref(), Some("~/s.json"));
        assert_eq!(cli.format, Some(ReportFormat::Json));
        assert!(cli.no_baseline);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["eco-valuation", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_invalid_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "observability": { "log_level": "loud" } }"#).unwrap();

        let cli = Cli::parse_from(["eco-valuation", "--config", path.to_str().unwrap()]);
        let err = load_config(&cli).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<eco_common::Error>(),
            Some(eco_common::Error::Config(_))
        ));
        assert_eq!(exit_code(&err), EXIT_CONFIG);
    }

    #[test]
    fn test_exit_codes() {
        let engine = anyhow::Error::new(ValuationError::InvalidRevenue { revenue: 0.0 });
        assert_eq!(exit_code(&engine), EXIT_INVALID_INPUT);

        let missing = anyhow::Error::new(eco_common::Error::NotFound("scenario".into()));
        assert_eq!(exit_code(&missing), 66);

        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }
}
