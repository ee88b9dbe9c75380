//! Integration tests for the HTTP registry client against a mock registry.

use serde_json::json;
use tempfile::TempDir;
use tfpub_core::{Error, ErrorKind};
use tfpub_registry::{
    ClientConfig, HttpRegistryClient, PlatformIdentity, ProviderIdentity, RegistryClient,
    VersionIdentity,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROVIDER_PATH: &str = "/api/v2/organizations/acme/registry-providers/private/acme/widgets";

fn client(server: &MockServer) -> HttpRegistryClient {
    HttpRegistryClient::new(ClientConfig::new("test-token").with_address(server.uri())).unwrap()
}

fn provider_id() -> ProviderIdentity {
    ProviderIdentity::from_project_name("acme", "terraform-provider-widgets")
}

fn version_id() -> VersionIdentity {
    VersionIdentity::new(provider_id(), "1.0.0").unwrap()
}

fn provider_doc() -> serde_json::Value {
    json!({
        "data": {
            "id": "prov-123",
            "type": "registry-providers",
            "attributes": {"name": "widgets", "namespace": "acme", "registry-name": "private"}
        }
    })
}

mod provider {
    use super::*;

    #[tokio::test]
    async fn read_sends_bearer_token_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROVIDER_PATH))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(provider_doc()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = client(&server).read_provider(&provider_id()).await.unwrap();
        assert_eq!(provider.id, "prov-123");
        assert_eq!(provider.name, "widgets");
        assert_eq!(provider.namespace, "acme");
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROVIDER_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{"status": "404", "title": "not found"}]
            })))
            .mount(&server)
            .await;

        let err = client(&server).read_provider(&provider_id()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn rejected_token_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROVIDER_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server).read_provider(&provider_id()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn server_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROVIDER_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client(&server).read_provider(&provider_id()).await.unwrap_err();
        match err {
            Error::Transport { status, body, .. } => {
                assert_eq!(status, Some(502));
                assert_eq!(body.as_deref(), Some("bad gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_success_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROVIDER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).read_provider(&provider_id()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[tokio::test]
    async fn create_posts_json_api_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/organizations/acme/registry-providers"))
            .and(header("content-type", "application/vnd.api+json"))
            .and(body_partial_json(json!({
                "data": {
                    "type": "registry-providers",
                    "attributes": {"name": "widgets", "namespace": "acme", "registry-name": "private"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(provider_doc()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = client(&server).create_provider(&provider_id()).await.unwrap();
        assert_eq!(provider.id, "prov-123");
    }
}

mod version {
    use super::*;

    #[tokio::test]
    async fn create_sends_key_id_and_exposes_upload_links() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{PROVIDER_PATH}/versions")))
            .and(body_partial_json(json!({
                "data": {
                    "type": "registry-provider-versions",
                    "attributes": {"version": "1.0.0", "key-id": "ABCDEF0123456789"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {
                    "id": "provver-1",
                    "type": "registry-provider-versions",
                    "attributes": {
                        "version": "1.0.0",
                        "key-id": "ABCDEF0123456789",
                        "shasums-uploaded": false,
                        "shasums-sig-uploaded": false
                    },
                    "links": {
                        "shasums-upload": "https://archivist.example/sums",
                        "shasums-sig-upload": "https://archivist.example/sig"
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let version = client(&server)
            .create_version(&version_id(), "ABCDEF0123456789")
            .await
            .unwrap();
        assert_eq!(version.key_id.as_deref(), Some("ABCDEF0123456789"));
        assert!(!version.shasums_uploaded);
        assert_eq!(
            version.shasums_upload_url().unwrap(),
            "https://archivist.example/sums"
        );
        assert_eq!(
            version.shasums_sig_upload_url().unwrap(),
            "https://archivist.example/sig"
        );
    }

    #[tokio::test]
    async fn read_reports_upload_flags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{PROVIDER_PATH}/versions/1.0.0")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": "provver-1",
                    "type": "registry-provider-versions",
                    "attributes": {
                        "version": "1.0.0",
                        "shasums-uploaded": true,
                        "shasums-sig-uploaded": true
                    },
                    "links": {}
                }
            })))
            .mount(&server)
            .await;

        let version = client(&server).read_version(&version_id()).await.unwrap();
        assert!(version.shasums_uploaded);
        assert!(version.shasums_sig_uploaded);
        assert!(version.shasums_upload_url.is_none());
    }
}

mod platform {
    use super::*;

    #[tokio::test]
    async fn create_sends_checksum_and_filename() {
        let server = MockServer::start().await;
        let shasum = "ab".repeat(32);
        Mock::given(method("POST"))
            .and(path(format!("{PROVIDER_PATH}/versions/1.0.0/platforms")))
            .and(body_partial_json(json!({
                "data": {
                    "type": "registry-provider-version-platforms",
                    "attributes": {
                        "os": "darwin",
                        "arch": "arm64",
                        "shasum": shasum,
                        "filename": "terraform-provider-widgets_1.0.0_darwin_arm64.zip"
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {
                    "id": "provpltfrm-1",
                    "type": "registry-provider-version-platforms",
                    "attributes": {
                        "os": "darwin",
                        "arch": "arm64",
                        "filename": "terraform-provider-widgets_1.0.0_darwin_arm64.zip",
                        "shasum": shasum,
                        "provider-binary-uploaded": false
                    },
                    "links": {"provider-binary-upload": "https://archivist.example/bin"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = PlatformIdentity::new(version_id(), "darwin", "arm64").unwrap();
        let platform = client(&server)
            .create_platform(&id, &shasum, "terraform-provider-widgets_1.0.0_darwin_arm64.zip")
            .await
            .unwrap();
        assert!(!platform.binary_uploaded);
        assert_eq!(
            platform.binary_upload_url().unwrap(),
            "https://archivist.example/bin"
        );
    }

    #[tokio::test]
    async fn read_missing_platform_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!(
                "{PROVIDER_PATH}/versions/1.0.0/platforms/linux/amd64"
            )))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let id = PlatformIdentity::new(version_id(), "linux", "amd64").unwrap();
        let err = client(&server).read_platform(&id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn streams_file_without_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/object/sums"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("SHA256SUMS");
        std::fs::write(&file, b"abc  p_1.0.0_linux_amd64.zip\n").unwrap();

        let url = format!("{}/object/sums", server.uri());
        client(&server).upload_file(&url, &file).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, b"abc  p_1.0.0_linux_amd64.zip\n");
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn non_200_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/object/bin"))
            .respond_with(ResponseTemplate::new(500).set_body_string("storage unavailable"))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("p.zip");
        std::fs::write(&file, b"zip").unwrap();

        let url = format!("{}/object/bin", server.uri());
        let err = client(&server).upload_file(&url, &file).await.unwrap_err();
        match err {
            Error::Transport { status, body, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(body.as_deref(), Some("storage unavailable"));
                assert!(message.contains("received 500 instead of 200"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn created_status_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("p.zip");
        std::fs::write(&file, b"zip").unwrap();

        let url = format!("{}/object/bin", server.uri());
        let err = client(&server).upload_file(&url, &file).await.unwrap_err();
        assert_eq!(err.status(), Some(201));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let server = MockServer::start().await;
        let url = format!("{}/object/bin", server.uri());
        let err = client(&server)
            .upload_file(&url, std::path::Path::new("/nonexistent/p.zip"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
