//! restgen
//!
//! Generates fluent Go request builders from annotated interface declarations.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use restgen_lib::{
    DEFAULT_RUNTIME_IMPORT, Formatter, GeneratorConfig, GeneratorError, Gofmt, Verbatim,
    generate_source, write_atomic,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Generate Go request builders from annotated interfaces.
///
/// Every interface whose doc comment carries an HTTP annotation such as
/// `@GET("/photos/{id}")` becomes a builder; its methods are routed by
/// `@PATH`, `@QUERY`, `@FIELD`, `@HEADER`, `@PART`, `@SYNC` and `@ASYNC`.
///
/// Examples:
///   restgen -i api.go -o api_builders.go
///   restgen -i api.go --dry-run
///   cat api.go | restgen --pkg client -o client/builders.go
#[derive(Debug, Parser)]
#[command(name = "restgen")]
#[command(author, version, about)]
struct Cli {
    /// Go source file to read (stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// File to write the generated builders to
    #[arg(short, long, value_name = "FILE", required_unless_present = "dry_run")]
    output: Option<PathBuf>,

    /// Package clause for the output (defaults to the input's package)
    #[arg(long, value_name = "NAME")]
    pkg: Option<String>,

    /// Import path of the package providing the `Client` capability
    #[arg(
        long,
        value_name = "IMPORT",
        env = "RESTGEN_RUNTIME_IMPORT",
        default_value = DEFAULT_RUNTIME_IMPORT
    )]
    runtime_import: String,

    /// Pipe the output through `gofmt`
    #[arg(long)]
    gofmt: bool,

    /// Omit the "Code generated" banner
    #[arg(long)]
    no_banner: bool,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read source from stdin: {0}")]
    Stdin(io::Error),

    #[error("failed to read '{path}': {source}")]
    Input { path: String, source: io::Error },

    #[error(transparent)]
    Generate(#[from] GeneratorError),
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default().with_runtime_import(&self.runtime_import);
        if let Some(pkg) = &self.pkg {
            config = config.with_package_name(pkg);
        }
        if self.no_banner {
            config = config.without_banner();
        }
        config
    }

    fn formatter(&self) -> Box<dyn Formatter> {
        if self.gofmt {
            Box::new(Gofmt::default())
        } else {
            Box::new(Verbatim)
        }
    }

    fn read_source(&self) -> Result<String, CliError> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.display().to_string(),
                source,
            }),
            None => {
                let mut source = String::new();
                io::stdin()
                    .read_to_string(&mut source)
                    .map_err(CliError::Stdin)?;
                Ok(source)
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let source = cli.read_source()?;
    let code = generate_source(&source, &cli.config(), cli.formatter().as_ref())?;

    match &cli.output {
        Some(path) if !cli.dry_run => {
            write_atomic(path, &code)?;
            tracing::info!(output = %path.display(), "Wrote generated builders");
        }
        _ => print!("{code}"),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("restgen: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_required_without_dry_run() {
        assert!(Cli::try_parse_from(["restgen", "-i", "api.go"]).is_err());
        assert!(Cli::try_parse_from(["restgen", "-i", "api.go", "--dry-run"]).is_ok());
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "restgen",
            "--dry-run",
            "--pkg",
            "client",
            "--runtime-import",
            "example.com/transport",
            "--no-banner",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.package_name.as_deref(), Some("client"));
        assert_eq!(config.runtime_import, "example.com/transport");
        assert!(!config.banner);
    }
}
