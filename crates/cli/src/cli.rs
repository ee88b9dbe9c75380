use crate::tracing::LogLevel;
use clap::{Args, Parser, Subcommand};
use miette::{Diagnostic, Report};
use std::io::{self, Write};
use std::path::PathBuf;
use tfpub_catalog::ArtifactSelector;
use tfpub_registry::DEFAULT_ADDRESS;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Registry, file or other runtime error exit code
pub const EXIT_PUBLISH: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tfpub::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Publish failure (exit code 3)
    #[error("Publish failed: {message}")]
    #[diagnostic(code(tfpub::cli::publish))]
    Publish {
        /// Error kind reported by the failing step
        kind: String,
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

/// Convert `tfpub_core::Error` to the matching `CliError` variant.
///
/// Configuration errors exit with code 2, everything else with code 3. The
/// diagnostic help of the original error is carried over.
impl From<tfpub_core::Error> for CliError {
    fn from(err: tfpub_core::Error) -> Self {
        let help = err.help().map(|h| h.to_string());
        match err {
            tfpub_core::Error::Configuration { message, help } => Self::Config {
                message,
                help: Some(help),
            },
            other => Self::Publish {
                kind: other.kind().to_string(),
                message: other.to_string(),
                help,
            },
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Publish { .. } => EXIT_PUBLISH,
    }
}

/// Render error appropriately based on JSON flag
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError, json_mode: bool) {
    if json_mode {
        let code = match err {
            CliError::Config { .. } => "config",
            CliError::Publish { kind, .. } => kind.as_str(),
        };
        let envelope = serde_json::json!({
            "status": "error",
            "error": {"code": code, "message": err.to_string()}
        });
        eprintln!("{envelope}");
    } else {
        let report = Report::new(err.clone());
        eprintln!("{report:?}");
    }
    let _ = io::stderr().flush();
}

#[derive(Parser, Debug)]
#[command(name = "tfpub")]
#[command(about = "Publish goreleaser-built Terraform providers to a private registry")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "info",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Publish a provider version, its checksums and platform archives")]
    Publish(PublishArgs),
    #[command(about = "Show version information")]
    Version,
}

/// Flags of `tfpub publish`.
#[derive(Args, Debug, Clone)]
pub struct PublishArgs {
    #[arg(long, env = "TFE_TOKEN", hide_env_values = true, help = "Registry API token")]
    pub token: String,

    #[arg(
        long,
        env = "TFE_ADDRESS",
        default_value = DEFAULT_ADDRESS,
        help = "Terraform Cloud or Enterprise address"
    )]
    pub address: String,

    #[arg(
        short = 'o',
        long,
        env = "TFE_ORGANIZATION",
        help = "Organization owning the private registry"
    )]
    pub organization: String,

    #[arg(long, help = "Provider namespace [default: the organization]")]
    pub namespace: Option<String>,

    #[arg(
        short = 'n',
        long,
        env = "TFPUB_PROVIDER_NAME",
        help = "Provider or project name [default: project_name from metadata.json]"
    )]
    pub name: Option<String>,

    #[arg(
        short = 'v',
        long,
        env = "TFPUB_VERSION",
        help = "Version to publish [default: version from metadata.json]"
    )]
    pub version: Option<String>,

    #[arg(
        short = 'f',
        long,
        env = "GPG_FINGERPRINT",
        help = "ID of the GPG key that signed the checksums"
    )]
    pub fingerprint: String,

    #[arg(
        short = 'a',
        long = "artifact",
        help = "Archive to publish, as os/arch or a file name fragment (repeatable) [default: all archives]"
    )]
    pub artifacts: Vec<ArtifactSelector>,

    #[arg(long, default_value = "dist/artifacts.json", help = "goreleaser artifact manifest")]
    pub artifacts_file: PathBuf,

    #[arg(
        long,
        default_value = "dist/metadata.json",
        help = "goreleaser release metadata, used when present"
    )]
    pub metadata_file: PathBuf,

    #[arg(long, default_value = ".", help = "Directory artifact paths are relative to")]
    pub project_root: PathBuf,
}

/// Parse command-line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
