//! Keys of the registry resources.
//!
//! Identities are derived once from the invocation and never change during a
//! run. Each level embeds its parent: a platform knows its version, which
//! knows its provider.

use std::fmt;
use tfpub_core::{Error, Result};

/// Prefix goreleaser projects carry that the registry name omits.
pub const PROVIDER_NAME_PREFIX: &str = "terraform-provider-";

/// Registry scope of every provider tfpub publishes.
pub const REGISTRY_NAME: &str = "private";

/// Key of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderIdentity {
    /// Organization owning the registry.
    pub organization: String,
    /// Provider namespace; for private providers this is the organization.
    pub namespace: String,
    /// Short provider name, e.g. `hashicups`.
    pub name: String,
}

impl ProviderIdentity {
    /// Private provider in the organization's own namespace.
    #[must_use]
    pub fn private(organization: impl Into<String>, name: impl Into<String>) -> Self {
        let organization = organization.into();
        Self {
            namespace: organization.clone(),
            organization,
            name: name.into(),
        }
    }

    /// Private provider named after a goreleaser project.
    ///
    /// The first `terraform-provider-` in the project name is removed.
    #[must_use]
    pub fn from_project_name(organization: impl Into<String>, project_name: &str) -> Self {
        Self::private(organization, project_name.replacen(PROVIDER_NAME_PREFIX, "", 1))
    }

    /// Overrides the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

impl fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{REGISTRY_NAME}/{}/{}",
            self.organization, self.namespace, self.name
        )
    }
}

/// Key of a provider version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionIdentity {
    /// Owning provider.
    pub provider: ProviderIdentity,
    /// Semantic version without a `v` prefix.
    pub version: String,
}

impl VersionIdentity {
    /// Creates a version identity, validating the version string.
    ///
    /// A single leading `v` is dropped, so `v1.2.3` and `1.2.3` are the same
    /// version.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the version is not valid semver.
    pub fn new(provider: ProviderIdentity, version: &str) -> Result<Self> {
        let trimmed = version.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);

        semver::Version::parse(bare).map_err(|e| {
            Error::configuration(
                format!("Invalid provider version '{version}': {e}"),
                "Versions must follow semantic versioning, e.g. 1.2.3",
            )
        })?;

        Ok(Self {
            provider,
            version: bare.to_string(),
        })
    }
}

impl fmt::Display for VersionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.provider, self.version)
    }
}

/// Key of a provider platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformIdentity {
    /// Owning version.
    pub version: VersionIdentity,
    /// Operating system, e.g. `darwin`.
    pub os: String,
    /// Architecture, e.g. `arm64`.
    pub arch: String,
}

impl PlatformIdentity {
    /// Creates a platform identity.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the OS or architecture is empty.
    pub fn new(version: VersionIdentity, os: &str, arch: &str) -> Result<Self> {
        if os.is_empty() || arch.is_empty() {
            return Err(Error::configuration(
                format!("Platform of {version} needs an OS and an architecture, got '{os}/{arch}'"),
                "Archive artifacts must carry goos and goarch",
            ));
        }

        Ok(Self {
            version,
            os: os.to_string(),
            arch: arch.to_string(),
        })
    }
}

impl fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}_{}", self.version, self.os, self.arch)
    }
}
