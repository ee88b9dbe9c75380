//! Command implementations.

pub mod publish;
pub mod version;

use crate::cli::{CliError, Commands, PublishArgs};

/// A parsed command ready to run.
#[derive(Debug, Clone)]
pub enum Command {
    /// Publish a provider version.
    Publish(Box<PublishArgs>),
    /// Print version information.
    Version,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Publish(args) => Self::Publish(Box::new(args)),
            Commands::Version => Self::Version,
        }
    }
}

impl Command {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Publish(_) => "publish",
            Self::Version => "version",
        }
    }

    /// Runs the command and returns what should be printed on stdout.
    ///
    /// # Errors
    ///
    /// Returns the command's error mapped to its exit code category.
    pub async fn execute(self) -> Result<Option<String>, CliError> {
        match self {
            Self::Publish(args) => {
                publish::execute_publish(*args).await?;
                Ok(None)
            }
            Self::Version => Ok(Some(version::get_version_info())),
        }
    }
}
