//! # File Storage
//!
//! This module provides read access to prompts stored on the local filesystem.
//! Prompts are stored as individual markdown files, one directory per domain:
//!
//! ```text
//! <base_path>/
//!   <domain>/
//!     <use_case>_v<version>.md
//! ```
//!
//! The main component of this module is the [`FsStorage`] struct, which implements the
//! [`Storage`] trait on top of `std::fs` and `walkdir`.
//!
//! # Examples
//!
//! ```rust
//! use pver_core::file_storage::FsStorage;
//! use pver_core::storage::{EntryKind, Storage};
//! use std::path::Path;
//! use tempfile::TempDir;
//!
//! // Create a temporary directory for our prompts
//! let temp_dir = TempDir::new().unwrap();
//! std::fs::create_dir(temp_dir.path().join("customer_ops")).unwrap();
//!
//! let storage = FsStorage::new(temp_dir.path());
//! let entries = storage.list_entries(Path::new("")).unwrap();
//!
//! assert_eq!(entries[0].name, "customer_ops");
//! assert_eq!(entries[0].kind, EntryKind::Dir);
//! ```

use crate::storage::{Entry, EntryKind, FileStat, Storage};
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A local file storage for prompts.
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// The base directory holding one subdirectory per domain.
    pub base_path: PathBuf,
}

impl FsStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> FsStorage {
        FsStorage {
            base_path: base_path.into(),
        }
    }
}

impl Default for FsStorage {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("prompts"),
        }
    }
}

impl Storage for FsStorage {
    fn root(&self) -> &Path {
        &self.base_path
    }

    /// Looks up what `relative` is, following symlinks.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - If nothing exists at the path.
    /// * `Ok(Some(kind))` - Whether it is a directory, a regular file or something else.
    /// * `io::Error` - If the path exists but cannot be inspected.
    fn entry_kind(&self, relative: &Path) -> io::Result<Option<EntryKind>> {
        match fs::metadata(self.locate(relative)) {
            Ok(metadata) => Ok(Some(kind_of(metadata.file_type()))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Lists the immediate children of a directory, sorted by file name.
    ///
    /// Entries whose names are not valid UTF-8 are skipped, since they cannot name a
    /// domain or a use case.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Entry>)` - The children of the directory.
    /// * `io::Error` - If the directory itself cannot be read.
    fn list_entries(&self, relative: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(self.locate(relative))
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // A dangling link or a vanished child only hides that entry.
                Err(err) if err.depth() > 0 => continue,
                Err(err) => return Err(err.into()),
            };
            if let Some(name) = entry.file_name().to_str() {
                entries.push(Entry::new(name, kind_of(entry.file_type())));
            }
        }

        Ok(entries)
    }

    fn read_to_string(&self, relative: &Path) -> io::Result<String> {
        fs::read_to_string(self.locate(relative))
    }

    /// Reads size and timestamps of a file.
    ///
    /// Platforms that do not record a creation time report the modification time instead.
    fn stat(&self, relative: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(self.locate(relative))?;
        let modified: DateTime<Local> = metadata.modified()?.into();
        let created = metadata
            .created()
            .map(DateTime::<Local>::from)
            .unwrap_or(modified);

        Ok(FileStat {
            size_bytes: metadata.len(),
            created,
            modified,
        })
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}
