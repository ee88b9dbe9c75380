//! Summary of a publish run.

use std::fmt;
use std::path::PathBuf;

/// What a file upload was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// The `SHA256SUMS` file of a version.
    Checksums,
    /// The detached signature of the checksum file.
    Signature,
    /// A platform archive.
    Binary,
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checksums => f.write_str("checksums"),
            Self::Signature => f.write_str("signature"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// A file sent to the registry during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// What the file was.
    pub kind: UploadKind,
    /// Local path that was uploaded.
    pub path: PathBuf,
}

/// Per-platform outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformOutcome {
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
    /// Archive file name registered for the platform.
    pub filename: String,
    /// Whether the platform was created by this run.
    pub created: bool,
    /// Whether the archive was uploaded by this run.
    pub uploaded: bool,
}

/// Report from a publish run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// `org/registry/namespace/name` of the provider.
    pub provider: String,
    /// Published version.
    pub version: String,
    /// Whether the provider was created by this run.
    pub provider_created: bool,
    /// Whether the version was created by this run.
    pub version_created: bool,
    /// Platforms in the order they were processed.
    pub platforms: Vec<PlatformOutcome>,
    /// Uploads in the order they happened.
    pub uploads: Vec<UploadRecord>,
}

impl PublishReport {
    pub(crate) fn new(provider: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub(crate) fn record_upload(&mut self, kind: UploadKind, path: impl Into<PathBuf>) {
        self.uploads.push(UploadRecord {
            kind,
            path: path.into(),
        });
    }

    /// Number of resources created (provider, version and platforms).
    #[must_use]
    pub fn created_count(&self) -> usize {
        usize::from(self.provider_created)
            + usize::from(self.version_created)
            + self.platforms.iter().filter(|p| p.created).count()
    }

    /// Number of files uploaded.
    #[must_use]
    pub fn upload_count(&self) -> usize {
        self.uploads.len()
    }

    /// Whether the remote state was already complete.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created_count() == 0 && self.uploads.is_empty()
    }
}

impl fmt::Display for PublishReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            return write!(
                f,
                "{} {} is already published ({} platforms)",
                self.provider,
                self.version,
                self.platforms.len()
            );
        }
        write!(
            f,
            "{} {}: {} created, {} uploaded, {} platforms",
            self.provider,
            self.version,
            self.created_count(),
            self.upload_count(),
            self.platforms.len()
        )
    }
}
