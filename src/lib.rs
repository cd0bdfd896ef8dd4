//! Release packaging orchestrator.
//!
//! Turns a frozen application tree into the native distributable of the
//! host platform:
//! - Windows: zip archive and setup executable
//! - macOS: compressed disk image
//! - Debian, Ubuntu, Linux Mint: .deb
//! - Fedora: .rpm
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
