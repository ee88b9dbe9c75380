//! Release metadata (`dist/metadata.json`).

use crate::artifact::read_json;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::path::Path;
use tfpub_core::Result;

/// Summary goreleaser writes for every release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    /// Project name, e.g. `terraform-provider-hashicups`.
    pub project_name: String,
    /// Git tag of the release, e.g. `v0.0.1`.
    #[serde(default)]
    pub tag: String,
    /// Previous git tag, if any.
    #[serde(default)]
    pub previous_tag: String,
    /// Version without the `v` prefix.
    pub version: String,
    /// Commit SHA the release was built from.
    #[serde(default)]
    pub commit: String,
    /// Build timestamp.
    #[serde(default)]
    pub date: Option<DateTime<FixedOffset>>,
    /// Platform goreleaser itself ran on.
    #[serde(default)]
    pub runtime: RuntimeInfo,
}

/// Host platform of the goreleaser run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuntimeInfo {
    /// Host operating system.
    #[serde(default)]
    pub goos: String,
    /// Host architecture.
    #[serde(default)]
    pub goarch: String,
}

impl Metadata {
    /// Loads `metadata.json`.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read and a `Format` error
    /// if it does not match the expected shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }
}
