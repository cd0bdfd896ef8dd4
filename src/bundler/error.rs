//! Error types for packaging operations.
//!
//! Every pipeline step returns [`Result`]. Filesystem failures carry the
//! operation and path through [`ErrorExt::fs_context`], external tool
//! failures carry the exit code and captured stderr.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while staging, trimming, archiving or invoking external tools.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form failure message.
    #[error("{0}")]
    GenericError(String),

    /// A failure wrapped with a description of what was being attempted.
    #[error("{context}: {source}")]
    Context {
        /// What was being attempted
        context: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Filesystem operation failed on a specific path.
    #[error("{context} ({}): {error}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: io::Error,
    },

    /// Bare IO error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// An external tool could not be started at all.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Spawn error
        #[source]
        error: io::Error,
    },

    /// An external tool ran but exited unsuccessfully.
    #[error("`{command}` exited with {}: {stderr}", .code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    ToolFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// A required tool is not on the system path.
    #[error("`{tool}` was not found on PATH. {hint}")]
    ToolNotFound {
        /// Tool name
        tool: String,
        /// Installation hint
        hint: String,
    },

    /// A required environment variable is not set.
    #[error("environment variable {name} is not set")]
    MissingEnv {
        /// Variable name
        name: String,
    },

    /// The version contained nothing usable for the installer compiler.
    #[error("version {0:?} has no segments left after normalization")]
    EmptyVersion(String),

    /// Unsupported architecture code.
    #[error("architecture error: {0}")]
    ArchError(String),

    /// The process launched to hold file locks exited before trimming.
    #[error("{} exited ({status}) before trimming; in-use files can no longer be told apart", .executable.display())]
    LockHolderExited {
        /// Executable that was launched
        executable: PathBuf,
        /// Its exit status
        status: std::process::ExitStatus,
    },

    /// Zip archive creation failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid glob pattern.
    #[error("glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory traversal failed.
    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// A walked path was not under its root.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the operation description and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attach a message to a failure or a missing value.
pub trait Context<T> {
    /// Wraps the failure with a fixed message.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Wraps the failure with a lazily built message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|source| Error::Context {
            context: context.to_string(),
            source: Box::new(source),
        })
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|source| Error::Context {
            context: f().to_string(),
            source: Box::new(source),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
