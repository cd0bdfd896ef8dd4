//! Top level error types for the packager binary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for a packaging run
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument or manifest errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments or manifest values
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The packaging manifest could not be read
    #[error("Cannot read manifest {}: {reason}", .path.display())]
    ManifestUnreadable {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}
