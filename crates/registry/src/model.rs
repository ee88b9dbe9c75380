//! Registry resources as the publisher sees them.

use tfpub_core::{Error, Result};

/// A provider in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Server-assigned id.
    pub id: String,
    /// Namespace reported by the registry.
    pub namespace: String,
    /// Short name reported by the registry.
    pub name: String,
}

/// A provider version and the state of its checksum uploads.
///
/// The upload URLs are pre-signed and short-lived; they are valid only for
/// the run that read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Server-assigned id.
    pub id: String,
    /// Semantic version.
    pub version: String,
    /// GPG key id the version was created with.
    pub key_id: Option<String>,
    /// Whether the `SHA256SUMS` file has been uploaded.
    pub shasums_uploaded: bool,
    /// Whether the `SHA256SUMS.sig` file has been uploaded.
    pub shasums_sig_uploaded: bool,
    /// Upload target for the `SHA256SUMS` file.
    pub shasums_upload_url: Option<String>,
    /// Upload target for the `SHA256SUMS.sig` file.
    pub shasums_sig_upload_url: Option<String>,
}

impl Version {
    /// Upload target for the checksums file.
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error if the registry did not issue one.
    pub fn shasums_upload_url(&self) -> Result<&str> {
        self.shasums_upload_url.as_deref().ok_or_else(|| {
            Error::transport(format!(
                "Version {} does not contain a shasums upload link",
                self.version
            ))
        })
    }

    /// Upload target for the checksums signature.
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error if the registry did not issue one.
    pub fn shasums_sig_upload_url(&self) -> Result<&str> {
        self.shasums_sig_upload_url.as_deref().ok_or_else(|| {
            Error::transport(format!(
                "Version {} does not contain a shasums signature upload link",
                self.version
            ))
        })
    }
}

/// A single OS/architecture build of a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Server-assigned id.
    pub id: String,
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
    /// Archive file name recorded at creation.
    pub filename: String,
    /// SHA-256 recorded at creation.
    pub shasum: String,
    /// Whether the archive has been uploaded.
    pub binary_uploaded: bool,
    /// Upload target for the archive.
    pub binary_upload_url: Option<String>,
}

impl Platform {
    /// Upload target for the archive.
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error if the registry did not issue one.
    pub fn binary_upload_url(&self) -> Result<&str> {
        self.binary_upload_url.as_deref().ok_or_else(|| {
            Error::transport(format!(
                "Platform {}_{} does not contain a binary upload link",
                self.os, self.arch
            ))
        })
    }
}
