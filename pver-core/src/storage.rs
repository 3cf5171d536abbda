//! # Storage
//!
//! The catalog never touches the filesystem directly. It reads through a
//! [`Storage`] value handed to it at construction, which makes it possible to
//! run the same lookups against a directory tree ([`crate::file_storage::FsStorage`])
//! or an in-memory tree ([`crate::memory_storage::MemoryStorage`]).
//!
//! All paths given to a storage are relative to its root; the empty path is
//! the root itself.

use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Other,
}

/// An immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Entry {
        Entry {
            name: name.into(),
            kind,
        }
    }
}

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileStat {
    pub size_bytes: u64,
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
}

/// Read-only access to a tree of prompt files.
pub trait Storage {
    /// Where the tree lives, for error messages and reported file paths.
    fn root(&self) -> &Path;

    /// The full path of `relative`, as reported to callers.
    fn locate(&self, relative: &Path) -> PathBuf {
        if relative.as_os_str().is_empty() {
            self.root().to_path_buf()
        } else {
            self.root().join(relative)
        }
    }

    /// What `relative` points at, or `None` if nothing is there.
    fn entry_kind(&self, relative: &Path) -> io::Result<Option<EntryKind>>;

    /// The immediate children of the directory `relative`, sorted by name.
    fn list_entries(&self, relative: &Path) -> io::Result<Vec<Entry>>;

    fn read_to_string(&self, relative: &Path) -> io::Result<String>;

    fn stat(&self, relative: &Path) -> io::Result<FileStat>;
}
