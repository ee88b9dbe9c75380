//! SHA-256 checksums for platform archives.
//!
//! The registry needs the archive's SHA-256 when a platform is created. It is
//! taken from the artifact metadata goreleaser already computed; the archive
//! is only hashed when the metadata has none.

use crate::artifact::Artifact;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tfpub_core::{Error, Result};
use tracing::debug;

const SHA256_PREFIX: &str = "sha256:";
const SHA256_HEX_LEN: usize = 64;

/// Validates a checksum string and returns it as lowercase hex.
///
/// Accepts bare hex or goreleaser's `sha256:<hex>` form.
///
/// # Errors
///
/// Returns a `Configuration` error for another algorithm, an empty value, or
/// anything that is not 64 hex digits.
pub fn normalize_checksum(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let hex_part = if let Some(rest) = raw.strip_prefix(SHA256_PREFIX) {
        rest
    } else if let Some((algorithm, _)) = raw.split_once(':') {
        return Err(Error::configuration(
            format!("Unsupported checksum algorithm '{algorithm}'"),
            "Configure goreleaser with `checksum.algorithm: sha256`",
        ));
    } else {
        raw
    };

    if hex_part.len() != SHA256_HEX_LEN || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::configuration(
            format!("Invalid SHA-256 checksum '{raw}'"),
            "Expected 64 hexadecimal digits",
        ));
    }

    Ok(hex_part.to_ascii_lowercase())
}

/// Computes the SHA-256 of a file by streaming it.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| {
        Error::io_with_source(
            format!("Failed to open {} for checksum: {e}", path.display()),
            Some(path.to_path_buf()),
            e,
        )
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| {
            Error::io_with_source(
                format!("Failed to read {} for checksum: {e}", path.display()),
                Some(path.to_path_buf()),
                e,
            )
        })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Resolves the checksum the registry should record for an archive.
///
/// `path` is the archive's resolved location, hashed only when the artifact
/// metadata carries no checksum.
///
/// # Errors
///
/// Returns a `Configuration` error for a malformed metadata checksum and an
/// `Io` error if the archive has to be hashed and cannot be read.
pub fn resolve_checksum(artifact: &Artifact, path: &Path) -> Result<String> {
    match artifact.extra.checksum.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => normalize_checksum(raw),
        _ => {
            debug!(
                artifact = %artifact.name,
                path = %path.display(),
                "No checksum in artifact metadata, hashing archive"
            );
            sha256_file(path)
        }
    }
}
