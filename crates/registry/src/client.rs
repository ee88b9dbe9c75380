//! The registry contract the publisher is written against.

use crate::identity::{PlatformIdentity, ProviderIdentity, VersionIdentity};
use crate::model::{Platform, Provider, Version};
use async_trait::async_trait;
use std::path::Path;
use tfpub_core::Result;

/// Typed access to the resources of one publish workflow.
///
/// Reads fail with a `NotFound` error when the resource does not exist; any
/// other error kind is fatal to the caller. Reads and creates are atomic from
/// the caller's point of view, and the registry is the only source of truth
/// for the upload flags.
///
/// # Implementors
///
/// - [`HttpRegistryClient`](crate::HttpRegistryClient) - Terraform Cloud / Enterprise API v2
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Reads a provider.
    async fn read_provider(&self, id: &ProviderIdentity) -> Result<Provider>;

    /// Creates a provider.
    async fn create_provider(&self, id: &ProviderIdentity) -> Result<Provider>;

    /// Reads a provider version.
    async fn read_version(&self, id: &VersionIdentity) -> Result<Version>;

    /// Creates a provider version signed with the given GPG key id.
    async fn create_version(&self, id: &VersionIdentity, key_id: &str) -> Result<Version>;

    /// Reads a provider platform.
    async fn read_platform(&self, id: &PlatformIdentity) -> Result<Platform>;

    /// Creates a provider platform for an archive.
    async fn create_platform(
        &self,
        id: &PlatformIdentity,
        shasum: &str,
        filename: &str,
    ) -> Result<Platform>;

    /// Uploads a local file to a pre-signed URL.
    ///
    /// Anything but HTTP 200 is a `Transport` error carrying the status and
    /// response body.
    async fn upload_file(&self, url: &str, path: &Path) -> Result<()>;
}
