//! opcheck - locate an operator bundle, load it and print validation results.

use clap::{Parser, ValueEnum};
use opcheck_common::OsFs;
use opcheck_core::{check_bundle, DirManifestReader};
use opcheck_validators::OperatorHubValidator;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "OPCHECK_LOG";

#[derive(Parser)]
#[command(name = "opcheck")]
#[command(
    author,
    version,
    about = "Find an operator bundle's metadata, load its manifests and validate them"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Bundle root directory
    bundle_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Settings for one run.
#[derive(Debug, Clone)]
struct RunConfig {
    bundle_root: PathBuf,
    verbose: bool,
    log_format: LogFormat,
}

impl Cli {
    /// `None` when no bundle root was given.
    fn into_config(self) -> Option<RunConfig> {
        Some(RunConfig {
            bundle_root: self.bundle_root?,
            verbose: self.verbose,
            log_format: self.log_format,
        })
    }
}

fn main() -> ExitCode {
    let Some(config) = Cli::parse().into_config() else {
        println!("usage: {} <bundle root>", env!("CARGO_PKG_NAME"));
        return ExitCode::FAILURE;
    };

    init_logging(&config);

    let outcome = {
        let mut out = io::stdout().lock();
        run(&config.bundle_root, &mut out).and_then(|count| {
            out.flush()?;
            Ok(count)
        })
    };

    match outcome {
        Ok(count) => {
            info!("Printed {} validation results", count);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!(
                "problem getting bundle [{}] data, {}",
                config.bundle_root.display(),
                err
            );
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(bundle_root: &Path, out: &mut W) -> opcheck_common::Result<usize> {
    let reader = DirManifestReader::new(OsFs);
    check_bundle(&OsFs, &reader, &OperatorHubValidator, bundle_root, out)
}

fn init_logging(config: &RunConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if config.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
    }
}
