//! Fatal errors.
//!
//! Only opening a registry can fail outright. Everything that happens after
//! that (missing domains, unreadable files, failed directory listings) is
//! reported through [`crate::diagnostics::Diagnostic`] instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// The storage root does not exist.
    #[error("Prompt directory not found: {}", .0.display())]
    StorageNotFound(PathBuf),

    /// The storage root exists but is not a directory.
    #[error("Path is not a directory: {}", .0.display())]
    StorageNotADirectory(PathBuf),

    /// The storage root could not be inspected.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
