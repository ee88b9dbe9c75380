//! Argument parsing of the tfpub CLI.

use clap::Parser;
use std::path::PathBuf;
use tfpub::cli::{Cli, Commands};
use tfpub::commands::Command;
use tfpub::tracing::LogLevel;
use tfpub_catalog::ArtifactSelector;

const REQUIRED: [&str; 7] = [
    "tfpub",
    "publish",
    "--token",
    "secret",
    "-o",
    "acme",
    "--fingerprint=32966F3FB5AC1129",
];

fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(REQUIRED.iter().chain(extra.iter()))
}

#[test]
fn publish_flags_and_defaults() {
    let cli = parse(&[]).unwrap();
    assert_eq!(cli.level, LogLevel::Info);
    assert!(!cli.json);

    let Commands::Publish(args) = cli.command else {
        panic!("expected the publish command");
    };
    assert_eq!(args.token, "secret");
    assert_eq!(args.organization, "acme");
    assert_eq!(args.fingerprint, "32966F3FB5AC1129");
    assert_eq!(args.artifacts_file, PathBuf::from("dist/artifacts.json"));
    assert_eq!(args.metadata_file, PathBuf::from("dist/metadata.json"));
    assert_eq!(args.project_root, PathBuf::from("."));
    assert!(args.artifacts.is_empty());
}

#[test]
fn repeated_artifacts_keep_order() {
    let cli = parse(&["-a", "darwin/arm64", "--artifact", "linux_amd64"]).unwrap();
    let Commands::Publish(args) = cli.command else {
        panic!("expected the publish command");
    };
    assert_eq!(
        args.artifacts,
        vec![
            ArtifactSelector::Platform {
                os: "darwin".to_string(),
                arch: "arm64".to_string(),
            },
            ArtifactSelector::NameContains("linux_amd64".to_string()),
        ]
    );
}

#[test]
fn short_flags_for_name_and_version() {
    let cli = parse(&["-n", "terraform-provider-widgets", "-v", "v1.2.3", "--json", "-l", "debug"]).unwrap();
    assert!(cli.json);
    assert_eq!(cli.level, LogLevel::Debug);
    let Commands::Publish(args) = cli.command else {
        panic!("expected the publish command");
    };
    assert_eq!(args.name.as_deref(), Some("terraform-provider-widgets"));
    assert_eq!(args.version.as_deref(), Some("v1.2.3"));
}

#[test]
fn malformed_platform_target_is_rejected() {
    assert!(parse(&["-a", "linux/amd64/v2"]).is_err());
    assert!(parse(&["-a", "/amd64"]).is_err());
}

#[test]
fn version_subcommand() {
    let cli = Cli::try_parse_from(["tfpub", "version"]).unwrap();
    let command: Command = cli.command.into();
    assert_eq!(command.name(), "version");
}
