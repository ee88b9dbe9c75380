//! `tfpub version`

use std::fmt::Write;
use tracing::instrument;

/// Build metadata baked in at compile time, when the release pipeline sets it.
const COMMIT: Option<&str> = option_env!("TFPUB_COMMIT");
const BUILD_DATE: Option<&str> = option_env!("TFPUB_BUILD_DATE");

/// Renders the version banner.
#[instrument]
#[must_use]
pub fn get_version_info() -> String {
    let mut info = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let _ = write!(info, "\ncommit: {}", COMMIT.unwrap_or("unknown"));
    let _ = write!(info, "\nbuilt at: {}", BUILD_DATE.unwrap_or("unknown"));

    tracing::debug!(
        commit = COMMIT.unwrap_or("unknown"),
        build_date = BUILD_DATE.unwrap_or("unknown"),
        "Gathered build information"
    );

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_format() {
        let info = get_version_info();
        let mut lines = info.lines();
        assert_eq!(
            lines.next(),
            Some(concat!("tfpub ", env!("CARGO_PKG_VERSION")))
        );
        assert!(lines.next().unwrap().starts_with("commit: "));
        assert!(lines.next().unwrap().starts_with("built at: "));
        assert!(lines.next().is_none());
    }
}
