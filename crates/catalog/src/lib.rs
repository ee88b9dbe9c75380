//! Artifact catalog for tfpub.
//!
//! Reads the manifests goreleaser leaves in `dist/`:
//!
//! - [`Catalog`] - the `artifacts.json` list of archives, checksums and signatures
//! - [`Metadata`] - the `metadata.json` release summary (project, version, commit)
//!
//! The catalog is read once per run and never mutated afterwards. Publishing
//! code asks it for the single checksum and signature files and uses an
//! [`ArtifactSelector`] to map requested platform targets onto archives.
//!
//! # Example
//!
//! ```rust,ignore
//! use tfpub_catalog::{ArtifactSelector, Catalog};
//!
//! let catalog = Catalog::load("dist/artifacts.json", ".")?;
//! let selector: ArtifactSelector = "darwin/arm64".parse()?;
//! let archives = catalog.select(&[selector])?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod artifact;
pub mod checksum;
pub mod metadata;
pub mod selector;

pub use artifact::{Artifact, ArtifactExtra, ArtifactKind, Catalog};
pub use checksum::{normalize_checksum, resolve_checksum, sha256_file};
pub use metadata::{Metadata, RuntimeInfo};
pub use selector::ArtifactSelector;
