//! Terraform Cloud / Enterprise implementation of [`RegistryClient`].
//!
//! Requests and responses are JSON:API documents. Status codes map onto
//! error kinds: 404 is `NotFound`, 401/403 is `Auth`, anything else that is
//! not a success is `Transport`.

use crate::client::RegistryClient;
use crate::config::ClientConfig;
use crate::identity::{PlatformIdentity, ProviderIdentity, REGISTRY_NAME, VersionIdentity};
use crate::model::{Platform, Provider, Version};
use crate::upload;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tfpub_core::{Error, Result};
use tracing::{debug, instrument};

const JSON_API: &str = "application/vnd.api+json";

const LINK_SHASUMS_UPLOAD: &str = "shasums-upload";
const LINK_SHASUMS_SIG_UPLOAD: &str = "shasums-sig-upload";
const LINK_BINARY_UPLOAD: &str = "provider-binary-upload";

/// JSON:API single-resource document.
#[derive(Debug, Deserialize)]
struct Document<A> {
    data: Resource<A>,
}

#[derive(Debug, Deserialize)]
struct Resource<A> {
    id: String,
    attributes: A,
    #[serde(default)]
    links: HashMap<String, Value>,
}

impl<A> Resource<A> {
    fn link(&self, name: &str) -> Option<String> {
        self.links.get(name).and_then(Value::as_str).map(String::from)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ProviderAttributes {
    name: String,
    namespace: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct VersionAttributes {
    version: String,
    #[serde(default)]
    key_id: Option<String>,
    #[serde(default)]
    shasums_uploaded: bool,
    #[serde(default)]
    shasums_sig_uploaded: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PlatformAttributes {
    os: String,
    arch: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    shasum: String,
    #[serde(default)]
    provider_binary_uploaded: bool,
}

impl From<Resource<ProviderAttributes>> for Provider {
    fn from(resource: Resource<ProviderAttributes>) -> Self {
        Self {
            id: resource.id,
            namespace: resource.attributes.namespace,
            name: resource.attributes.name,
        }
    }
}

impl From<Resource<VersionAttributes>> for Version {
    fn from(resource: Resource<VersionAttributes>) -> Self {
        Self {
            shasums_upload_url: resource.link(LINK_SHASUMS_UPLOAD),
            shasums_sig_upload_url: resource.link(LINK_SHASUMS_SIG_UPLOAD),
            id: resource.id,
            version: resource.attributes.version,
            key_id: resource.attributes.key_id,
            shasums_uploaded: resource.attributes.shasums_uploaded,
            shasums_sig_uploaded: resource.attributes.shasums_sig_uploaded,
        }
    }
}

impl From<Resource<PlatformAttributes>> for Platform {
    fn from(resource: Resource<PlatformAttributes>) -> Self {
        Self {
            binary_upload_url: resource.link(LINK_BINARY_UPLOAD),
            id: resource.id,
            os: resource.attributes.os,
            arch: resource.attributes.arch,
            filename: resource.attributes.filename,
            shasum: resource.attributes.shasum,
            binary_uploaded: resource.attributes.provider_binary_uploaded,
        }
    }
}

/// Registry client for the Terraform Cloud / Enterprise v2 API.
pub struct HttpRegistryClient {
    http: Client,
    api_root: String,
    token: SecretString,
    request_timeout: Duration,
}

impl HttpRegistryClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error if the HTTP client cannot be initialised
    /// (for example when the TLS backend fails to load).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_root: config.api_root(),
            http,
            token: config.token,
            request_timeout: config.request_timeout,
        })
    }

    fn provider_path(id: &ProviderIdentity) -> String {
        format!(
            "organizations/{}/registry-providers/{REGISTRY_NAME}/{}/{}",
            id.organization, id.namespace, id.name
        )
    }

    fn version_path(id: &VersionIdentity) -> String {
        format!("{}/versions/{}", Self::provider_path(&id.provider), id.version)
    }

    fn platform_path(id: &PlatformIdentity) -> String {
        format!(
            "{}/platforms/{}/{}",
            Self::version_path(&id.version),
            id.os,
            id.arch
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(self.token.expose_secret())
            .header(ACCEPT, JSON_API)
            .timeout(self.request_timeout)
    }

    async fn get<A: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<Resource<A>> {
        let url = format!("{}{path}", self.api_root);
        debug!(%url, "GET");

        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed to read {resource}: {e}")))?;

        Self::decode(response, resource).await
    }

    async fn post<A: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        resource: &str,
    ) -> Result<Resource<A>> {
        let url = format!("{}{path}", self.api_root);
        debug!(%url, "POST");

        let payload = serde_json::to_vec(body)
            .map_err(|e| Error::format(format!("Failed to encode {resource}: {e}"), None))?;

        let response = self
            .authorized(self.http.post(&url))
            .header(CONTENT_TYPE, JSON_API)
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed to create {resource}: {e}")))?;

        Self::decode(response, resource).await
    }

    async fn decode<A: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> Result<Resource<A>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response for {resource}: {e}")))?;

        match status {
            s if s.is_success() => serde_json::from_str::<Document<A>>(&body)
                .map(|doc| doc.data)
                .map_err(|e| Error::format(format!("Unexpected response for {resource}: {e}"), None)),
            StatusCode::NOT_FOUND => Err(Error::not_found(resource)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::auth(
                format!("{resource}: registry returned {status}"),
                status.as_u16(),
            )),
            _ => Err(Error::Transport {
                message: format!("{resource}: registry returned {status}: {body}"),
                status: Some(status.as_u16()),
                body: Some(body),
            }),
        }
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    #[instrument(skip_all, fields(provider = %id))]
    async fn read_provider(&self, id: &ProviderIdentity) -> Result<Provider> {
        let resource = format!("provider {id}");
        self.get::<ProviderAttributes>(&Self::provider_path(id), &resource)
            .await
            .map(Provider::from)
    }

    #[instrument(skip_all, fields(provider = %id))]
    async fn create_provider(&self, id: &ProviderIdentity) -> Result<Provider> {
        let body = json!({
            "data": {
                "type": "registry-providers",
                "attributes": {
                    "name": id.name,
                    "namespace": id.namespace,
                    "registry-name": REGISTRY_NAME,
                }
            }
        });
        let path = format!("organizations/{}/registry-providers", id.organization);
        let resource = format!("provider {id}");
        self.post::<ProviderAttributes>(&path, &body, &resource)
            .await
            .map(Provider::from)
    }

    #[instrument(skip_all, fields(version = %id))]
    async fn read_version(&self, id: &VersionIdentity) -> Result<Version> {
        let resource = format!("version {id}");
        self.get::<VersionAttributes>(&Self::version_path(id), &resource)
            .await
            .map(Version::from)
    }

    #[instrument(skip_all, fields(version = %id))]
    async fn create_version(&self, id: &VersionIdentity, key_id: &str) -> Result<Version> {
        let body = json!({
            "data": {
                "type": "registry-provider-versions",
                "attributes": {
                    "version": id.version,
                    "key-id": key_id,
                }
            }
        });
        let path = format!("{}/versions", Self::provider_path(&id.provider));
        let resource = format!("version {id}");
        self.post::<VersionAttributes>(&path, &body, &resource)
            .await
            .map(Version::from)
    }

    #[instrument(skip_all, fields(platform = %id))]
    async fn read_platform(&self, id: &PlatformIdentity) -> Result<Platform> {
        let resource = format!("platform {id}");
        self.get::<PlatformAttributes>(&Self::platform_path(id), &resource)
            .await
            .map(Platform::from)
    }

    #[instrument(skip_all, fields(platform = %id))]
    async fn create_platform(
        &self,
        id: &PlatformIdentity,
        shasum: &str,
        filename: &str,
    ) -> Result<Platform> {
        let body = json!({
            "data": {
                "type": "registry-provider-version-platforms",
                "attributes": {
                    "os": id.os,
                    "arch": id.arch,
                    "shasum": shasum,
                    "filename": filename,
                }
            }
        });
        let path = format!("{}/platforms", Self::version_path(&id.version));
        let resource = format!("platform {id}");
        self.post::<PlatformAttributes>(&path, &body, &resource)
            .await
            .map(Platform::from)
    }

    async fn upload_file(&self, url: &str, path: &Path) -> Result<()> {
        upload::upload_file(&self.http, url, path).await
    }
}
