//! Build artifacts produced by goreleaser.
//!
//! This module handles:
//! - Artifact type tags (archive, checksum, signature)
//! - Loading `artifacts.json` into an ordered [`Catalog`]
//! - Locating the single checksum and signature files of a release
//! - Resolving relative artifact paths against the project root

use crate::selector::ArtifactSelector;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tfpub_core::{Error, Result};
use tracing::debug;

/// The goreleaser artifact type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ArtifactKind {
    /// A per-platform archive (zip) containing the provider binary.
    Archive,
    /// The `SHA256SUMS` file covering every archive.
    Checksum,
    /// The detached GPG signature of the checksum file.
    Signature,
    /// Any other goreleaser type (`Binary`, `Source`, ...), never published.
    Other(String),
}

impl From<String> for ArtifactKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Archive" => Self::Archive,
            "Checksum" => Self::Checksum,
            "Signature" => Self::Signature,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive => f.write_str("Archive"),
            Self::Checksum => f.write_str("Checksum"),
            Self::Signature => f.write_str("Signature"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// Type-specific metadata goreleaser attaches to an artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArtifactExtra {
    /// Checksum of the artifact, usually `sha256:<hex>`.
    #[serde(rename = "Checksum", default)]
    pub checksum: Option<String>,
    /// Build id that produced the artifact.
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    /// Archive format (e.g. `zip`).
    #[serde(rename = "Format", default)]
    pub format: Option<String>,
    /// File extension including the dot.
    #[serde(rename = "Ext", default)]
    pub ext: Option<String>,
    /// Binary name inside the archive.
    #[serde(rename = "Binary", default)]
    pub binary: Option<String>,
    /// All binaries inside the archive.
    #[serde(rename = "Binaries", default)]
    pub binaries: Vec<String>,
}

/// A single local build output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artifact {
    /// File name, e.g. `terraform-provider-hashicups_0.0.1_darwin_arm64.zip`.
    pub name: String,
    /// Path as recorded by goreleaser, usually relative to the project root.
    pub path: PathBuf,
    /// Target operating system (empty for checksum/signature files).
    #[serde(default)]
    pub goos: String,
    /// Target architecture (empty for checksum/signature files).
    #[serde(default)]
    pub goarch: String,
    /// Artifact type tag.
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Type-specific metadata.
    #[serde(default)]
    pub extra: ArtifactExtra,
}

impl Artifact {
    /// Whether this artifact is a per-platform archive.
    #[must_use]
    pub fn is_archive(&self) -> bool {
        self.kind == ArtifactKind::Archive
    }

    /// `os_arch` label used in log output.
    #[must_use]
    pub fn platform_label(&self) -> String {
        format!("{}_{}", self.goos, self.goarch)
    }
}

/// The ordered artifacts of one release.
#[derive(Debug, Clone)]
pub struct Catalog {
    artifacts: Vec<Artifact>,
    root: PathBuf,
}

impl Catalog {
    /// Creates a catalog from already-parsed artifacts.
    #[must_use]
    pub fn new(artifacts: Vec<Artifact>, root: impl Into<PathBuf>) -> Self {
        Self {
            artifacts,
            root: root.into(),
        }
    }

    /// Loads `artifacts.json`.
    ///
    /// Relative artifact paths are later resolved against `root`.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read and a `Format` error
    /// if it does not contain an array of artifacts.
    pub fn load(manifest: impl AsRef<Path>, root: impl Into<PathBuf>) -> Result<Self> {
        let manifest = manifest.as_ref();
        let artifacts: Vec<Artifact> = read_json(manifest)?;

        debug!(
            manifest = %manifest.display(),
            count = artifacts.len(),
            "Loaded artifact catalog"
        );

        Ok(Self::new(artifacts, root))
    }

    /// All artifacts in manifest order.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Archive artifacts in manifest order.
    pub fn archives(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(|a| a.is_archive())
    }

    /// Directory relative artifact paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of an artifact.
    #[must_use]
    pub fn resolve_path(&self, artifact: &Artifact) -> PathBuf {
        if artifact.path.is_absolute() {
            artifact.path.clone()
        } else {
            self.root.join(&artifact.path)
        }
    }

    /// Returns the only artifact of the given kind.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if there is no such artifact or more
    /// than one.
    pub fn single(&self, kind: &ArtifactKind) -> Result<&Artifact> {
        let mut matches = self.artifacts.iter().filter(|a| &a.kind == kind);

        let first = matches.next().ok_or_else(|| {
            Error::configuration(
                format!("No {kind} artifact found in the catalog"),
                "Make sure goreleaser's checksum and signs sections are enabled",
            )
        })?;

        if let Some(second) = matches.next() {
            return Err(Error::configuration(
                format!(
                    "Expected exactly one {kind} artifact, found '{}' and '{}'",
                    first.name, second.name
                ),
                "Remove the extra entries from the goreleaser configuration",
            ));
        }

        Ok(first)
    }

    /// The `SHA256SUMS` artifact.
    ///
    /// # Errors
    ///
    /// See [`Catalog::single`].
    pub fn checksums(&self) -> Result<&Artifact> {
        self.single(&ArtifactKind::Checksum)
    }

    /// The `SHA256SUMS.sig` artifact.
    ///
    /// # Errors
    ///
    /// See [`Catalog::single`].
    pub fn signature(&self) -> Result<&Artifact> {
        self.single(&ArtifactKind::Signature)
    }

    /// Resolves the archives to publish.
    ///
    /// Each selector must match exactly one archive. With no selectors every
    /// archive is returned, provided no two share an OS/arch pair.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when a selector matches zero or
    /// several archives, or when the catalog holds conflicting archives.
    pub fn select(&self, selectors: &[ArtifactSelector]) -> Result<Vec<&Artifact>> {
        if selectors.is_empty() {
            return self.all_archives();
        }

        let mut selected: Vec<&Artifact> = Vec::with_capacity(selectors.len());
        let mut platforms = HashSet::new();
        for selector in selectors {
            let matches: Vec<&Artifact> = self.archives().filter(|a| selector.matches(a)).collect();

            let artifact = match matches.as_slice() {
                [only] => *only,
                [] => {
                    return Err(Error::configuration(
                        format!("No archive artifact matches '{selector}'"),
                        format!(
                            "Available archives: {}",
                            self.archives()
                                .map(|a| a.name.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    ));
                }
                many => {
                    return Err(Error::configuration(
                        format!(
                            "'{selector}' matches {} archive artifacts: {}",
                            many.len(),
                            many.iter()
                                .map(|a| a.name.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                        "Pass the full archive file name or an os/arch pair",
                    ));
                }
            };

            if selected.iter().any(|a| a.name == artifact.name) {
                debug!(artifact = %artifact.name, "Archive selected more than once");
                continue;
            }
            if !platforms.insert((artifact.goos.as_str(), artifact.goarch.as_str())) {
                return Err(Error::configuration(
                    format!(
                        "'{selector}' selects {} but another archive already targets {}",
                        artifact.name,
                        artifact.platform_label()
                    ),
                    "Select a single archive per os/arch",
                ));
            }
            selected.push(artifact);
        }

        Ok(selected)
    }

    fn all_archives(&self) -> Result<Vec<&Artifact>> {
        let mut seen = HashSet::new();
        let mut archives = Vec::new();

        for archive in self.archives() {
            if !seen.insert((archive.goos.as_str(), archive.goarch.as_str())) {
                return Err(Error::configuration(
                    format!(
                        "Several archives target {}; cannot publish them all",
                        archive.platform_label()
                    ),
                    "Select the archive to publish with --artifact",
                ));
            }
            archives.push(archive);
        }

        Ok(archives)
    }
}

/// Reads and decodes a JSON manifest.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::io_with_source(
            format!("Failed to read {}: {e}", path.display()),
            Some(path.to_path_buf()),
            e,
        )
    })?;

    let de = &mut serde_json::Deserializer::from_str(&content);
    serde_path_to_error::deserialize(de).map_err(|e| {
        Error::format(
            format!("{}: {} at '{}'", path.display(), e.inner(), e.path()),
            Some(path.to_path_buf()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfpub_core::ErrorKind;

    fn artifact(name: &str, goos: &str, goarch: &str, kind: ArtifactKind) -> Artifact {
        Artifact {
            name: name.to_string(),
            path: PathBuf::from("dist").join(name),
            goos: goos.to_string(),
            goarch: goarch.to_string(),
            kind,
            extra: ArtifactExtra::default(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                artifact("p_1.0.0_darwin_arm64.zip", "darwin", "arm64", ArtifactKind::Archive),
                artifact("p_1.0.0_linux_amd64.zip", "linux", "amd64", ArtifactKind::Archive),
                artifact("p_1.0.0_linux_arm64.zip", "linux", "arm64", ArtifactKind::Archive),
                artifact("p_1.0.0_SHA256SUMS", "", "", ArtifactKind::Checksum),
                artifact("p_1.0.0_SHA256SUMS.sig", "", "", ArtifactKind::Signature),
            ],
            "/work",
        )
    }

    #[test]
    fn test_kind_from_string() {
        assert_eq!(ArtifactKind::from("Archive".to_string()), ArtifactKind::Archive);
        assert_eq!(ArtifactKind::from("Checksum".to_string()), ArtifactKind::Checksum);
        assert_eq!(ArtifactKind::from("Signature".to_string()), ArtifactKind::Signature);
        assert_eq!(
            ArtifactKind::from("Binary".to_string()),
            ArtifactKind::Other("Binary".to_string())
        );
    }

    #[test]
    fn test_deserialize_goreleaser_record() {
        let json = r#"{
            "name": "terraform-provider-hashicups_0.0.1_darwin_arm64.zip",
            "path": "dist/terraform-provider-hashicups_0.0.1_darwin_arm64.zip",
            "goos": "darwin",
            "goarch": "arm64",
            "internal_type": 1,
            "type": "Archive",
            "extra": {
                "Binaries": ["terraform-provider-hashicups_v0.0.1"],
                "Checksum": "sha256:abc",
                "Format": "zip",
                "ID": "default",
                "Ext": ".zip"
            }
        }"#;

        let parsed: Artifact = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, ArtifactKind::Archive);
        assert_eq!(parsed.goos, "darwin");
        assert_eq!(parsed.extra.checksum.as_deref(), Some("sha256:abc"));
        assert_eq!(parsed.extra.binaries.len(), 1);
        assert_eq!(parsed.extra.id.as_deref(), Some("default"));
    }

    #[test]
    fn test_deserialize_without_platform_fields() {
        let json = r#"{"name": "SUMS", "path": "dist/SUMS", "type": "Checksum"}"#;
        let parsed: Artifact = serde_json::from_str(json).unwrap();
        assert!(parsed.goos.is_empty());
        assert_eq!(parsed.extra, ArtifactExtra::default());
    }

    #[test]
    fn test_single_checksum_and_signature() {
        let catalog = catalog();
        assert_eq!(catalog.checksums().unwrap().name, "p_1.0.0_SHA256SUMS");
        assert_eq!(catalog.signature().unwrap().name, "p_1.0.0_SHA256SUMS.sig");
    }

    #[test]
    fn test_single_missing() {
        let catalog = Catalog::new(vec![], ".");
        let err = catalog.checksums().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_single_duplicate() {
        let catalog = Catalog::new(
            vec![
                artifact("a_SHA256SUMS", "", "", ArtifactKind::Checksum),
                artifact("b_SHA256SUMS", "", "", ArtifactKind::Checksum),
            ],
            ".",
        );
        let err = catalog.checksums().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("a_SHA256SUMS"));
    }

    #[test]
    fn test_resolve_relative_and_absolute_paths() {
        let catalog = catalog();
        let relative = &catalog.artifacts()[0];
        assert_eq!(
            catalog.resolve_path(relative),
            PathBuf::from("/work/dist/p_1.0.0_darwin_arm64.zip")
        );

        let mut absolute = relative.clone();
        absolute.path = PathBuf::from("/abs/p.zip");
        assert_eq!(catalog.resolve_path(&absolute), PathBuf::from("/abs/p.zip"));
    }

    #[test]
    fn test_select_by_platform() {
        let catalog = catalog();
        let selected = catalog
            .select(&["darwin/arm64".parse().unwrap()])
            .unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "p_1.0.0_darwin_arm64.zip");
    }

    #[test]
    fn test_select_by_name_fragment() {
        let catalog = catalog();
        let selected = catalog.select(&["linux_amd64".parse().unwrap()]).unwrap();
        assert_eq!(selected[0].goarch, "amd64");
    }

    #[test]
    fn test_select_ambiguous_fragment_fails() {
        let catalog = catalog();
        let err = catalog.select(&["linux".parse().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("matches 2 archive artifacts"));
    }

    #[test]
    fn test_select_no_match_fails() {
        let catalog = catalog();
        let err = catalog.select(&["windows/amd64".parse().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_select_ignores_non_archives() {
        let catalog = catalog();
        // The checksum file name contains the fragment but is not an archive.
        let err = catalog.select(&["SHA256SUMS".parse().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("No archive artifact matches"));
    }

    #[test]
    fn test_select_all_archives_by_default() {
        let catalog = catalog();
        let selected = catalog.select(&[]).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_select_all_rejects_duplicate_platforms() {
        let catalog = Catalog::new(
            vec![
                artifact("a_linux_amd64.zip", "linux", "amd64", ArtifactKind::Archive),
                artifact("b_linux_amd64.zip", "linux", "amd64", ArtifactKind::Archive),
            ],
            ".",
        );
        let err = catalog.select(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_select_deduplicates_repeated_targets() {
        let catalog = catalog();
        let selected = catalog
            .select(&[
                "darwin/arm64".parse().unwrap(),
                "darwin_arm64".parse().unwrap(),
            ])
            .unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_select_rejects_two_archives_for_one_platform() {
        let catalog = Catalog::new(
            vec![
                artifact("a_linux_amd64.zip", "linux", "amd64", ArtifactKind::Archive),
                artifact("b_linux_amd64.zip", "linux", "amd64", ArtifactKind::Archive),
            ],
            ".",
        );
        let err = catalog
            .select(&["a_linux".parse().unwrap(), "b_linux".parse().unwrap()])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("b_linux_amd64.zip"));
    }
}
