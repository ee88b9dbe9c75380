//! Find-or-create for registry resources.

use std::future::Future;
use tfpub_core::Result;
use tracing::{debug, info};

/// Outcome of [`ensure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensured<T> {
    /// The resource already existed; nothing was mutated.
    Found(T),
    /// The resource was missing and has been created.
    Created(T),
}

impl<T> Ensured<T> {
    /// Whether the resource was created by this call.
    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Borrows the resource.
    #[must_use]
    pub const fn get(&self) -> &T {
        match self {
            Self::Found(value) | Self::Created(value) => value,
        }
    }

    /// Unwraps the resource.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Found(value) | Self::Created(value) => value,
        }
    }
}

/// Reads a resource and creates it when the read reports `NotFound`.
///
/// `create` is only invoked after a `NotFound` read, so a resource that
/// exists is never mutated.
///
/// # Errors
///
/// Any read error other than `NotFound` is returned unchanged, as is any
/// error from `create`.
pub async fn ensure<T, R, C, F>(resource: &str, read: R, create: C) -> Result<Ensured<T>>
where
    R: Future<Output = Result<T>>,
    C: FnOnce() -> F,
    F: Future<Output = Result<T>>,
{
    match read.await {
        Ok(value) => {
            debug!(resource, "Found existing resource");
            Ok(Ensured::Found(value))
        }
        Err(e) if e.is_not_found() => {
            info!(resource, "Resource missing, creating");
            create().await.map(Ensured::Created)
        }
        Err(e) => Err(e),
    }
}
