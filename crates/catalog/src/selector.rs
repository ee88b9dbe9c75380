//! Mapping requested platform targets onto archive artifacts.

use crate::artifact::Artifact;
use std::fmt;
use std::str::FromStr;
use tfpub_core::Error;

/// How a requested platform target picks its archive.
///
/// Parsed from command-line input: `os/arch` selects by the artifact's
/// `goos`/`goarch`, anything else is a file-name fragment matched by
/// containment. Only archives are ever considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSelector {
    /// Archive whose file name contains the fragment.
    NameContains(String),
    /// Archive built for exactly this OS and architecture.
    Platform {
        /// Target operating system, e.g. `darwin`
        os: String,
        /// Target architecture, e.g. `arm64`
        arch: String,
    },
}

impl ArtifactSelector {
    /// Whether the artifact satisfies this selector.
    #[must_use]
    pub fn matches(&self, artifact: &Artifact) -> bool {
        if !artifact.is_archive() {
            return false;
        }
        match self {
            Self::NameContains(fragment) => artifact.name.contains(fragment.as_str()),
            Self::Platform { os, arch } => artifact.goos == *os && artifact.goarch == *arch,
        }
    }
}

impl fmt::Display for ArtifactSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameContains(fragment) => f.write_str(fragment),
            Self::Platform { os, arch } => write!(f, "{os}/{arch}"),
        }
    }
}

impl FromStr for ArtifactSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::configuration(
                "Empty artifact target",
                "Pass an archive name fragment or an os/arch pair, e.g. darwin/arm64",
            ));
        }

        match s.split_once('/') {
            Some((os, arch)) if !os.is_empty() && !arch.is_empty() && !arch.contains('/') => {
                Ok(Self::Platform {
                    os: os.to_string(),
                    arch: arch.to_string(),
                })
            }
            Some(_) => Err(Error::configuration(
                format!("Invalid platform target: {s}"),
                "Platform targets have the form os/arch, e.g. linux/amd64",
            )),
            None => Ok(Self::NameContains(s.to_string())),
        }
    }
}
