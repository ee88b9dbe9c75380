//! Error types for publish operations.

use miette::Diagnostic;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publish operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
///
/// Callers match on the kind instead of inspecting messages. Only
/// [`ErrorKind::NotFound`] is recoverable inside a run; every other kind
/// aborts the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested remote resource does not exist.
    NotFound,
    /// Network failure or an unexpected HTTP status.
    Transport,
    /// A manifest or response body could not be decoded.
    Format,
    /// Invalid or ambiguous user input.
    Configuration,
    /// The registry rejected the credentials.
    Auth,
    /// A local file could not be read.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "not-found",
            Self::Transport => "transport",
            Self::Format => "format",
            Self::Configuration => "configuration",
            Self::Auth => "auth",
            Self::Io => "io",
        };
        f.write_str(s)
    }
}

/// Errors that can occur while publishing a provider.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The registry has no such resource.
    #[error("Resource not found: {resource}")]
    #[diagnostic(code(tfpub::not_found))]
    NotFound {
        /// Human-readable resource description (e.g. `provider acme/widgets`)
        resource: String,
    },

    /// The request could not be completed or returned an unexpected status.
    #[error("Registry transport error: {message}")]
    #[diagnostic(
        code(tfpub::transport),
        help("Re-run the publish command; completed steps are skipped")
    )]
    Transport {
        /// The error message
        message: String,
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Response body, when a response was received
        body: Option<String>,
    },

    /// A manifest or registry response did not have the expected shape.
    #[error("Invalid format: {message}")]
    #[diagnostic(
        code(tfpub::format),
        help("Check that the file was produced by a compatible goreleaser version")
    )]
    Format {
        /// The error message
        message: String,
        /// The file that failed to parse, if any
        path: Option<PathBuf>,
    },

    /// The invocation is invalid or ambiguous.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tfpub::configuration), help("{help}"))]
    Configuration {
        /// The error message
        message: String,
        /// Help text for the user
        help: String,
    },

    /// The registry rejected the API token.
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tfpub::auth),
        help("Check that TFE_TOKEN holds a valid team or user token with registry access")
    )]
    Auth {
        /// The error message
        message: String,
        /// HTTP status code (401 or 403)
        status: u16,
    },

    /// A local file could not be opened or read.
    #[error("I/O error: {message}")]
    #[diagnostic(code(tfpub::io))]
    Io {
        /// The error message
        message: String,
        /// The path that caused the error
        path: Option<PathBuf>,
        /// The underlying source error
        #[source]
        source: Option<std::io::Error>,
    },
}

impl Error {
    /// Create a new not-found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a transport error without a response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Create a transport error from an HTTP response.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::Transport {
            message: format!("received {status} instead of 200: {body}"),
            status: Some(status),
            body: Some(body),
        }
    }

    /// Create a new format error.
    #[must_use]
    pub fn format(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Format {
            message: message.into(),
            path,
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a new authentication error.
    #[must_use]
    pub fn auth(message: impl Into<String>, status: u16) -> Self {
        Self::Auth {
            message: message.into(),
            status,
        }
    }

    /// Create a new I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a new I/O error with source.
    #[must_use]
    pub fn io_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Format { .. } => ErrorKind::Format,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Whether this error means the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }
}
