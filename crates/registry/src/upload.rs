//! Streaming uploads to pre-signed URLs.

use reqwest::header::CONTENT_LENGTH;
use reqwest::{Body, Client, StatusCode};
use std::path::Path;
use tfpub_core::{Error, Result};
use tokio_util::io::ReaderStream;
use tracing::debug;

/// PUTs a file to `url`, streaming it from disk.
///
/// The URL is pre-signed, so no credentials are attached. Only HTTP 200
/// counts as success.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be opened and a `Transport` error
/// for network failures or any other status, carrying the status and body.
pub async fn upload_file(client: &Client, url: &str, path: &Path) -> Result<()> {
    let io_error = |e: std::io::Error| {
        Error::io_with_source(
            format!("Failed to open {} for upload: {e}", path.display()),
            Some(path.to_path_buf()),
            e,
        )
    };

    let file = tokio::fs::File::open(path).await.map_err(io_error)?;
    let length = file.metadata().await.map_err(io_error)?.len();

    debug!(path = %path.display(), bytes = length, "Uploading file");

    let response = client
        .put(url)
        .header(CONTENT_LENGTH, length)
        .body(Body::wrap_stream(ReaderStream::new(file)))
        .send()
        .await
        .map_err(|e| Error::transport(format!("Failed to upload {}: {e}", path.display())))?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.map_err(|e| {
            Error::transport(format!(
                "Upload of {} returned {status} and its body could not be read: {e}",
                path.display()
            ))
        })?;
        return Err(Error::http_status(status.as_u16(), body));
    }

    Ok(())
}
