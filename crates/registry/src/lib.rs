//! Private provider registry client for tfpub.
//!
//! This crate defines the [`RegistryClient`] contract the publisher drives and
//! ships [`HttpRegistryClient`], an implementation for the Terraform Cloud /
//! Terraform Enterprise v2 API.
//!
//! # Resources
//!
//! - [`Provider`] keyed by [`ProviderIdentity`]
//! - [`Version`] keyed by [`VersionIdentity`], with checksum/signature upload flags
//! - [`Platform`] keyed by [`PlatformIdentity`], with a binary upload flag
//!
//! Reads of a missing resource fail with
//! [`ErrorKind::NotFound`](tfpub_core::ErrorKind::NotFound); every other
//! failure is reported with its own kind.
//!
//! # Example
//!
//! ```rust,ignore
//! use tfpub_registry::{ClientConfig, HttpRegistryClient, ProviderIdentity, RegistryClient};
//!
//! let client = HttpRegistryClient::new(ClientConfig::new(token))?;
//! let id = ProviderIdentity::from_project_name("acme", "terraform-provider-widgets");
//! let provider = client.read_provider(&id).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod client;
mod config;
mod http;
mod identity;
mod model;
mod upload;

pub use client::RegistryClient;
pub use config::{ClientConfig, DEFAULT_ADDRESS, DEFAULT_BASE_PATH};
pub use http::HttpRegistryClient;
pub use identity::{
    PROVIDER_NAME_PREFIX, PlatformIdentity, ProviderIdentity, REGISTRY_NAME, VersionIdentity,
};
pub use model::{Platform, Provider, Version};
pub use upload::upload_file;
