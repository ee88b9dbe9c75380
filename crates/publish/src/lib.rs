//! Provider publishing for tfpub.
//!
//! Takes a goreleaser [`Catalog`](tfpub_catalog::Catalog) and makes the
//! private registry match it:
//!
//! - [`ensure`] - find-or-create for a single registry resource
//! - [`Publisher`] - provider, version, checksum files, platforms and binaries
//!   in dependency order
//! - [`PublishReport`] - what a run created and uploaded
//!
//! Runs are idempotent. A run against a fully published version only reads.
//!
//! # Example
//!
//! ```rust,ignore
//! use tfpub_publish::{PublishConfig, Publisher};
//!
//! let config = PublishConfig::new(version, "32966F3FB5AC1129");
//! let report = Publisher::new(&client, &catalog, config).publish().await?;
//! println!("{report}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ensure;
pub mod orchestrator;
pub mod report;

pub use ensure::{Ensured, ensure};
pub use orchestrator::{PublishConfig, Publisher};
pub use report::{PlatformOutcome, PublishReport, UploadKind, UploadRecord};
