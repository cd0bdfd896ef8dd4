//! Shared helpers for the packaging pipelines.

pub mod archive;
pub mod fs;
pub mod process;
