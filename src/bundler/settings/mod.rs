//! Configuration structures for packaging operations.
//!
//! This module provides the immutable per-run configuration: package
//! metadata, platform-specific settings, the builder assembling them and the
//! artifact paths derived from them.

mod arch;
mod builder;
mod core;
mod linux;
mod macos;
mod package;
mod paths;
mod windows;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use linux::{DebianSettings, LinuxSettings, RpmSettings};
pub use macos::MacOsSettings;
pub use package::PackageSettings;
pub use paths::{DebianPaths, MacPaths, RpmPaths, WindowsPaths};
pub use windows::{TrimSettings, WindowsSettings};
