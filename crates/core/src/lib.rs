//! Core types shared by every tfpub crate.
//!
//! The whole publish pipeline reports failures through a single tagged
//! [`Error`] so that callers branch on [`ErrorKind`] rather than on message
//! text. The most important kind is [`ErrorKind::NotFound`]: a registry read
//! that fails with it is the signal to create the missing resource.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;

pub use error::{Error, ErrorKind, Result};
