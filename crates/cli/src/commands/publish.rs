//! `tfpub publish`

use crate::cli::PublishArgs;
use std::path::{Path, PathBuf};
use tfpub_catalog::{Catalog, Metadata};
use tfpub_core::{Error, Result};
use tfpub_publish::{PublishConfig, PublishReport, Publisher};
use tfpub_registry::{ClientConfig, HttpRegistryClient, ProviderIdentity, VersionIdentity};
use tracing::{debug, info, instrument};

/// Everything a publish needs, resolved from flags and manifests.
#[derive(Debug)]
pub struct PublishPlan {
    /// Registry-side identities, key id and selected targets.
    pub config: PublishConfig,
    /// Artifacts of the release.
    pub catalog: Catalog,
}

fn under_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Loads `metadata.json` if it exists.
fn load_metadata(path: &Path) -> Result<Option<Metadata>> {
    if !path.exists() {
        debug!(path = %path.display(), "No release metadata, relying on flags");
        return Ok(None);
    }
    Metadata::load(path).map(Some)
}

/// Resolves flags, environment and goreleaser manifests into a plan.
///
/// Flags win over `metadata.json`. Nothing is sent to the registry.
///
/// # Errors
///
/// Returns a `Configuration` error when the provider name or version can be
/// determined from neither flags nor metadata, or is invalid, and the
/// catalog's `Io`/`Format` errors.
pub fn resolve_plan(args: &PublishArgs) -> Result<PublishPlan> {
    let root = &args.project_root;
    let metadata = load_metadata(&under_root(root, &args.metadata_file))?;

    let name = args
        .name
        .clone()
        .or_else(|| metadata.as_ref().map(|m| m.project_name.clone()))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            Error::configuration(
                "No provider name given",
                "Pass --name or run goreleaser so dist/metadata.json exists",
            )
        })?;

    let version = args
        .version
        .clone()
        .or_else(|| metadata.as_ref().map(|m| m.version.clone()))
        .filter(|version| !version.is_empty())
        .ok_or_else(|| {
            Error::configuration(
                "No provider version given",
                "Pass --version or run goreleaser so dist/metadata.json exists",
            )
        })?;

    if args.fingerprint.trim().is_empty() {
        return Err(Error::configuration(
            "GPG key id is empty",
            "Pass --fingerprint or set GPG_FINGERPRINT",
        ));
    }

    let mut provider = ProviderIdentity::from_project_name(&args.organization, &name);
    if let Some(namespace) = &args.namespace {
        provider = provider.with_namespace(namespace);
    }
    let version = VersionIdentity::new(provider, &version)?;

    let catalog = Catalog::load(under_root(root, &args.artifacts_file), root)?;

    Ok(PublishPlan {
        config: PublishConfig::new(version, args.fingerprint.trim())
            .with_targets(args.artifacts.clone()),
        catalog,
    })
}

/// Execute the `publish` command.
///
/// # Errors
///
/// Returns the first error of plan resolution or of the publish run.
#[instrument(name = "publish", skip_all, fields(organization = %args.organization))]
pub async fn execute_publish(args: PublishArgs) -> Result<PublishReport> {
    let plan = resolve_plan(&args)?;

    let client =
        HttpRegistryClient::new(ClientConfig::new(args.token).with_address(&args.address))?;

    let report = Publisher::new(&client, &plan.catalog, plan.config)
        .publish()
        .await?;

    info!(
        provider = %report.provider,
        version = %report.version,
        created = report.created_count(),
        uploaded = report.upload_count(),
        "{report}"
    );

    Ok(report)
}
