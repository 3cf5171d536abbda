//! In-memory [`Storage`], for tests and for embedding prompt trees that do not
//! live on disk.
//!
//! Files and directories can be marked unreadable to reproduce permission
//! failures without touching the real filesystem.

use crate::storage::{Entry, EntryKind, FileStat, Storage};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
enum Node {
    Dir {
        readable: bool,
    },
    File {
        contents: Option<String>,
        created: DateTime<Local>,
        modified: DateTime<Local>,
    },
}

#[derive(Debug, Clone)]
pub struct MemoryStorage {
    root: PathBuf,
    nodes: BTreeMap<PathBuf, Node>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl MemoryStorage {
    /// An empty tree; `root` is only used to build reported paths.
    pub fn new(root: impl Into<PathBuf>) -> MemoryStorage {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::new(), Node::Dir { readable: true });
        MemoryStorage {
            root: root.into(),
            nodes,
        }
    }

    /// Adds a directory and any missing parents.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert_dir(path.as_ref(), true);
        self
    }

    /// Adds a directory whose listing fails with `PermissionDenied`.
    pub fn with_unreadable_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert_dir(path.as_ref(), false);
        self
    }

    /// Adds a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        let now = Local::now();
        self.with_file_at(path, contents, now)
    }

    /// Adds a file with a fixed creation and modification time.
    pub fn with_file_at(
        mut self,
        path: impl AsRef<Path>,
        contents: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        self.insert_file(path.as_ref(), Some(contents.into()), timestamp);
        self
    }

    /// Adds a file whose reads fail with `PermissionDenied`.
    pub fn with_unreadable_file(mut self, path: impl AsRef<Path>) -> Self {
        self.insert_file(path.as_ref(), None, Local::now());
        self
    }

    fn insert_dir(&mut self, path: &Path, readable: bool) {
        if let Some(parent) = path.parent() {
            self.ensure_parents(parent);
        }
        self.nodes.insert(path.to_path_buf(), Node::Dir { readable });
    }

    fn insert_file(&mut self, path: &Path, contents: Option<String>, timestamp: DateTime<Local>) {
        if let Some(parent) = path.parent() {
            self.ensure_parents(parent);
        }
        self.nodes.insert(
            path.to_path_buf(),
            Node::File {
                contents,
                created: timestamp,
                modified: timestamp,
            },
        );
    }

    fn ensure_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir { readable: true });
        }
    }

    fn node(&self, relative: &Path) -> io::Result<&Node> {
        self.nodes.get(&normalize(relative)).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", self.locate(relative).display()),
            )
        })
    }
}

/// Drops `.` components so `Path::new("./a")` and `Path::new("a")` agree.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

fn permission_denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

impl Storage for MemoryStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    fn entry_kind(&self, relative: &Path) -> io::Result<Option<EntryKind>> {
        Ok(self.nodes.get(&normalize(relative)).map(|node| match node {
            Node::Dir { .. } => EntryKind::Dir,
            Node::File { .. } => EntryKind::File,
        }))
    }

    fn list_entries(&self, relative: &Path) -> io::Result<Vec<Entry>> {
        let directory = normalize(relative);
        match self.node(&directory)? {
            Node::Dir { readable: true } => {}
            Node::Dir { readable: false } => return Err(permission_denied(&self.locate(relative))),
            Node::File { .. } => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("{} is not a directory", self.locate(relative).display()),
                ));
            }
        }

        let entries = self
            .nodes
            .iter()
            .filter(|(path, _)| {
                !path.as_os_str().is_empty() && path.parent() == Some(directory.as_path())
            })
            .filter_map(|(path, node)| {
                let name = path.file_name()?.to_str()?;
                let kind = match node {
                    Node::Dir { .. } => EntryKind::Dir,
                    Node::File { .. } => EntryKind::File,
                };
                Some(Entry::new(name, kind))
            })
            .collect();

        Ok(entries)
    }

    fn read_to_string(&self, relative: &Path) -> io::Result<String> {
        match self.node(relative)? {
            Node::File {
                contents: Some(contents),
                ..
            } => Ok(contents.clone()),
            Node::File { contents: None, .. } => Err(permission_denied(&self.locate(relative))),
            Node::Dir { .. } => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is a directory", self.locate(relative).display()),
            )),
        }
    }

    fn stat(&self, relative: &Path) -> io::Result<FileStat> {
        match self.node(relative)? {
            Node::File {
                contents,
                created,
                modified,
            } => Ok(FileStat {
                size_bytes: contents.as_ref().map_or(0, |c| c.len() as u64),
                created: *created,
                modified: *modified,
            }),
            Node::Dir { .. } => Ok(FileStat {
                size_bytes: 0,
                created: Local::now(),
                modified: Local::now(),
            }),
        }
    }
}
