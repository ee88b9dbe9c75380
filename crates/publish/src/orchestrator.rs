//! Publish orchestrator.
//!
//! Drives a release into the registry in dependency order: provider, version,
//! version files, then one platform per archive with its binary. Every step
//! reads before it writes, so re-running after a failure resumes where the
//! previous run stopped.

use crate::ensure::{Ensured, ensure};
use crate::report::{PlatformOutcome, PublishReport, UploadKind};
use std::path::PathBuf;
use tfpub_catalog::{Artifact, ArtifactSelector, Catalog, resolve_checksum};
use tfpub_core::Result;
use tfpub_registry::{
    Platform, PlatformIdentity, Provider, ProviderIdentity, RegistryClient, Version,
    VersionIdentity,
};
use tracing::{debug, info};

/// What to publish.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Version to publish, including its provider.
    pub version: VersionIdentity,
    /// GPG key id the checksum file was signed with.
    pub key_id: String,
    /// Archives to publish; empty publishes every archive.
    pub targets: Vec<ArtifactSelector>,
}

impl PublishConfig {
    /// Creates a configuration that publishes every archive.
    #[must_use]
    pub fn new(version: VersionIdentity, key_id: impl Into<String>) -> Self {
        Self {
            version,
            key_id: key_id.into(),
            targets: Vec::new(),
        }
    }

    /// Restricts the run to the given archives.
    #[must_use]
    pub fn with_targets(mut self, targets: Vec<ArtifactSelector>) -> Self {
        self.targets = targets;
        self
    }

    /// The provider being published.
    #[must_use]
    pub const fn provider(&self) -> &ProviderIdentity {
        &self.version.provider
    }
}

/// Publishes one provider version.
///
/// The publisher borrows the registry client and the catalog; it holds no
/// remote state of its own. Upload flags are always taken from the most
/// recent read or create.
pub struct Publisher<'a> {
    client: &'a dyn RegistryClient,
    catalog: &'a Catalog,
    config: PublishConfig,
}

impl<'a> Publisher<'a> {
    /// Creates a publisher.
    #[must_use]
    pub fn new(client: &'a dyn RegistryClient, catalog: &'a Catalog, config: PublishConfig) -> Self {
        Self {
            client,
            catalog,
            config,
        }
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// Runs the whole pipeline.
    ///
    /// Archive selection is resolved before the first remote call, so an
    /// ambiguous or unmatched target leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Remote steps completed before
    /// the failure stay in place and are skipped on the next run.
    pub async fn publish(&self) -> Result<PublishReport> {
        let plan = self.plan()?;
        let provider_id = self.config.provider();

        info!(
            provider = %provider_id,
            version = %self.config.version.version,
            platforms = plan.len(),
            "Publishing provider"
        );

        let mut report = PublishReport::new(provider_id.to_string(), &self.config.version.version);

        report.provider_created = self.ensure_provider().await?.was_created();

        let version = self.ensure_version().await?;
        report.version_created = version.was_created();
        let version = version.into_inner();

        if let Some(path) = self.ensure_sums_uploaded(&version).await? {
            report.record_upload(UploadKind::Checksums, path);
        }
        if let Some(path) = self.ensure_sig_uploaded(&version).await? {
            report.record_upload(UploadKind::Signature, path);
        }

        for (id, archive) in plan {
            let platform = self.ensure_platform_with(&id, archive).await?;
            let created = platform.was_created();
            let platform = platform.into_inner();

            let uploaded = self.ensure_binary_uploaded(&platform, archive).await?;
            if let Some(path) = &uploaded {
                report.record_upload(UploadKind::Binary, path.clone());
            }

            report.platforms.push(PlatformOutcome {
                os: id.os,
                arch: id.arch,
                filename: archive.name.clone(),
                created,
                uploaded: uploaded.is_some(),
            });
        }

        info!(
            created = report.created_count(),
            uploaded = report.upload_count(),
            "Publish complete"
        );

        Ok(report)
    }

    /// Resolves the archives and their platform identities.
    fn plan(&self) -> Result<Vec<(PlatformIdentity, &'a Artifact)>> {
        let catalog: &'a Catalog = self.catalog;
        catalog
            .select(&self.config.targets)?
            .into_iter()
            .map(|archive| {
                debug!(archive = %archive.name, "Selected archive");
                self.platform_identity(archive).map(|id| (id, archive))
            })
            .collect()
    }

    fn platform_identity(&self, archive: &Artifact) -> Result<PlatformIdentity> {
        PlatformIdentity::new(self.config.version.clone(), &archive.goos, &archive.goarch)
    }

    /// Reads the provider, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns any error other than `NotFound` from the read, or the create
    /// error.
    pub async fn ensure_provider(&self) -> Result<Ensured<Provider>> {
        let id = self.config.provider();
        let resource = format!("provider {id}");
        ensure(&resource, self.client.read_provider(id), || {
            self.client.create_provider(id)
        })
        .await
    }

    /// Reads the version, creating it with the signing key id if missing.
    ///
    /// # Errors
    ///
    /// Returns any error other than `NotFound` from the read, or the create
    /// error.
    pub async fn ensure_version(&self) -> Result<Ensured<Version>> {
        let id = &self.config.version;
        let resource = format!("version {id}");
        ensure(&resource, self.client.read_version(id), || {
            self.client.create_version(id, &self.config.key_id)
        })
        .await
    }

    /// Uploads the checksum file unless the registry already has it.
    ///
    /// Returns the uploaded path, or `None` when nothing was sent.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the catalog does not hold exactly
    /// one checksum file, a `Transport` error when the version has no upload
    /// link or the upload fails.
    pub async fn ensure_sums_uploaded(&self, version: &Version) -> Result<Option<PathBuf>> {
        if version.shasums_uploaded {
            debug!(version = %version.version, "Checksums already uploaded, skipping");
            return Ok(None);
        }

        let url = version.shasums_upload_url()?;
        let artifact = self.catalog.checksums()?;
        self.upload(UploadKind::Checksums, url, artifact).await.map(Some)
    }

    /// Uploads the checksum signature unless the registry already has it.
    ///
    /// Returns the uploaded path, or `None` when nothing was sent.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the catalog does not hold exactly
    /// one signature, a `Transport` error when the version has no upload link
    /// or the upload fails.
    pub async fn ensure_sig_uploaded(&self, version: &Version) -> Result<Option<PathBuf>> {
        if version.shasums_sig_uploaded {
            debug!(version = %version.version, "Signature already uploaded, skipping");
            return Ok(None);
        }

        let url = version.shasums_sig_upload_url()?;
        let artifact = self.catalog.signature()?;
        self.upload(UploadKind::Signature, url, artifact).await.map(Some)
    }

    /// Reads the platform of an archive, creating it if missing.
    ///
    /// A new platform is registered with the archive's checksum and file
    /// name.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the archive lacks an OS or
    /// architecture or carries a malformed checksum, otherwise the registry
    /// error.
    pub async fn ensure_platform(&self, archive: &Artifact) -> Result<Ensured<Platform>> {
        let id = self.platform_identity(archive)?;
        self.ensure_platform_with(&id, archive).await
    }

    async fn ensure_platform_with(
        &self,
        id: &PlatformIdentity,
        archive: &Artifact,
    ) -> Result<Ensured<Platform>> {
        let resource = format!("platform {id}");
        ensure(&resource, self.client.read_platform(id), || async move {
            let path = self.catalog.resolve_path(archive);
            let shasum = resolve_checksum(archive, &path)?;
            debug!(platform = %id, %shasum, "Resolved archive checksum");
            self.client.create_platform(id, &shasum, &archive.name).await
        })
        .await
    }

    /// Uploads the archive of a platform unless the registry already has it.
    ///
    /// Returns the uploaded path, or `None` when nothing was sent.
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error when the platform has no upload link or
    /// the upload fails.
    pub async fn ensure_binary_uploaded(
        &self,
        platform: &Platform,
        archive: &Artifact,
    ) -> Result<Option<PathBuf>> {
        if platform.binary_uploaded {
            debug!(
                platform = %archive.platform_label(),
                "Binary already uploaded, skipping"
            );
            return Ok(None);
        }

        let url = platform.binary_upload_url()?;
        self.upload(UploadKind::Binary, url, archive).await.map(Some)
    }

    async fn upload(&self, kind: UploadKind, url: &str, artifact: &Artifact) -> Result<PathBuf> {
        let path = self.catalog.resolve_path(artifact);
        info!(%kind, artifact = %artifact.name, path = %path.display(), "Uploading");
        self.client.upload_file(url, &path).await?;
        Ok(path)
    }
}
