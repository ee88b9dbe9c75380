//! tfpub - publish Terraform providers built by goreleaser to a private registry
//!
//! The binary wires the workspace crates together:
//!
//! - `tfpub-catalog` reads `dist/artifacts.json` and `dist/metadata.json`
//! - `tfpub-registry` talks to the Terraform Cloud / Enterprise API
//! - `tfpub-publish` provisions the provider, version and platforms and
//!   uploads what is missing
//!
//! This library exposes the CLI pieces so they can be tested without spawning
//! the binary.

#![allow(clippy::print_stdout, clippy::print_stderr)]

/// CLI argument parsing and exit codes.
pub mod cli;
/// Command implementations.
pub mod commands;
/// Tracing initialization.
pub mod tracing;
