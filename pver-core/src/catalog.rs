//! # Catalog
//!
//! Discovers what a prompt tree contains: domains are the immediate
//! subdirectories of the storage root, use cases are the distinct prefixes of
//! the versioned files inside a domain (`<use_case>_v<version><ext>`).
//!
//! Nothing is cached. Every call lists the storage again, so the catalog
//! always reflects the tree as it is at call time.
//!
//! Apart from construction, nothing here returns an error. Missing domains,
//! missing use cases and unreadable directories degrade to empty results with
//! a [`Diagnostic`] attached.

use crate::artifact::VersionRecord;
use crate::diagnostics::{Diagnostic, Scanned};
use crate::error::{RegistryError, Result};
use crate::storage::{Entry, EntryKind, Storage};
use crate::version::{VersionTag, split_versioned_name};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_EXTENSION: &str = ".md";

/// A versioned file found in a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Path relative to the storage root.
    pub path: PathBuf,
    pub version: VersionTag,
}

pub struct Catalog<S: Storage> {
    storage: S,
    extension: String,
}

impl<S: Storage> Catalog<S> {
    /// Wraps `storage`, checking that its root is an existing directory.
    ///
    /// # Returns
    ///
    /// * `RegistryError::StorageNotFound` - If the root does not exist.
    /// * `RegistryError::StorageNotADirectory` - If the root is not a directory.
    /// * `RegistryError::Io` - If the root cannot be inspected.
    pub fn new(storage: S) -> Result<Catalog<S>> {
        let root = storage.root().to_path_buf();
        match storage.entry_kind(Path::new(""))? {
            None => Err(RegistryError::StorageNotFound(root)),
            Some(EntryKind::Dir) => Ok(Catalog {
                storage,
                extension: DEFAULT_EXTENSION.to_string(),
            }),
            Some(_) => Err(RegistryError::StorageNotADirectory(root)),
        }
    }

    /// Sets the file suffix of prompt files. A leading dot is added when missing.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = if extension.is_empty() || extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sorted names of all domains.
    pub fn list_domains(&self) -> Scanned<Vec<String>> {
        match self.storage.list_entries(Path::new("")) {
            Ok(entries) => {
                let mut domains: Vec<String> = entries
                    .into_iter()
                    .filter(|entry| entry.kind == EntryKind::Dir)
                    .map(|entry| entry.name)
                    .collect();
                domains.sort();
                Scanned::new(domains)
            }
            Err(err) => Scanned::with_diagnostic(
                Vec::new(),
                Diagnostic::Enumeration {
                    path: self.storage.root().to_path_buf(),
                    message: err.to_string(),
                },
            ),
        }
    }

    /// Sorted, distinct use cases of a domain.
    pub fn list_use_cases(&self, domain: &str) -> Scanned<Vec<String>> {
        self.domain_entries(domain).map(|entries| {
            let use_cases: BTreeSet<String> = entries
                .iter()
                .filter_map(|entry| self.split(entry))
                .map(|(use_case, _)| use_case.to_string())
                .collect();
            use_cases.into_iter().collect()
        })
    }

    /// The highest version of a use case.
    pub fn find_latest(&self, domain: &str, use_case: &str) -> Scanned<Option<Located>> {
        let mut scanned = Scanned::new(None);
        let versions = scanned.absorb(self.matching_files(domain, use_case));

        let latest = versions.into_iter().max_by(|a, b| a.version.cmp(&b.version));
        if let Some(located) = &latest {
            debug!(domain, use_case, version = %located.version, "resolved latest prompt version");
        }
        scanned.value = latest;
        scanned
    }

    /// The file holding exactly `version` (compared as written, e.g. `"1.0"` is not `"1"`).
    pub fn find_version(
        &self,
        domain: &str,
        use_case: &str,
        version: &str,
    ) -> Scanned<Option<Located>> {
        let mut scanned = Scanned::new(None);
        let versions = scanned.absorb(self.matching_files(domain, use_case));
        if versions.is_empty() {
            return scanned;
        }

        match versions
            .into_iter()
            .find(|located| located.version.as_str() == version)
        {
            Some(located) => scanned.value = Some(located),
            None => scanned.push(Diagnostic::VersionNotFound {
                domain: domain.to_string(),
                use_case: use_case.to_string(),
                version: version.to_string(),
            }),
        }
        scanned
    }

    /// Every stored version of a use case, newest first.
    pub fn list_versions(&self, domain: &str, use_case: &str) -> Scanned<Vec<VersionRecord>> {
        let mut scanned = Scanned::new(Vec::new());
        let mut versions = scanned.absorb(self.matching_files(domain, use_case));
        versions.sort_by(|a, b| b.version.cmp(&a.version));

        for located in versions {
            match self.storage.stat(&located.path) {
                Ok(stat) => scanned.value.push(VersionRecord {
                    version: located.version.as_str().to_string(),
                    file_path: self.storage.locate(&located.path),
                    created_date: stat.created,
                    modified_date: stat.modified,
                    size_bytes: stat.size_bytes,
                }),
                Err(err) => scanned.push(Diagnostic::FileStat {
                    path: self.storage.locate(&located.path),
                    message: err.to_string(),
                }),
            }
        }
        scanned
    }

    /// All versioned files of `use_case`, in storage listing order.
    fn matching_files(&self, domain: &str, use_case: &str) -> Scanned<Vec<Located>> {
        let mut scanned = Scanned::new(Vec::new());
        let entries = scanned.absorb(self.domain_entries(domain));
        if !scanned.is_clean() {
            return scanned;
        }

        let domain_path = Path::new(domain);
        scanned.value = entries
            .iter()
            .filter_map(|entry| {
                let (name, version) = self.split(entry)?;
                (name == use_case).then(|| Located {
                    path: domain_path.join(&entry.name),
                    version,
                })
            })
            .collect();

        if scanned.value.is_empty() {
            scanned.push(Diagnostic::UseCaseNotFound {
                domain: domain.to_string(),
                use_case: use_case.to_string(),
            });
        }
        scanned
    }

    /// Lists a domain directory, turning absence and listing failures into diagnostics.
    fn domain_entries(&self, domain: &str) -> Scanned<Vec<Entry>> {
        let not_found = || {
            Scanned::with_diagnostic(
                Vec::new(),
                Diagnostic::DomainNotFound {
                    domain: domain.to_string(),
                },
            )
        };

        if !is_plain_name(domain) {
            return not_found();
        }

        let domain_path = Path::new(domain);
        match self.storage.entry_kind(domain_path) {
            Ok(Some(EntryKind::Dir)) => {}
            Ok(_) => return not_found(),
            Err(err) => {
                return Scanned::with_diagnostic(
                    Vec::new(),
                    Diagnostic::Enumeration {
                        path: self.storage.locate(domain_path),
                        message: err.to_string(),
                    },
                );
            }
        }

        match self.storage.list_entries(domain_path) {
            Ok(entries) => Scanned::new(entries),
            Err(err) => Scanned::with_diagnostic(
                Vec::new(),
                Diagnostic::Enumeration {
                    path: self.storage.locate(domain_path),
                    message: err.to_string(),
                },
            ),
        }
    }

    /// Splits a directory entry into use case and version, skipping anything
    /// that is not a visible prompt file.
    fn split<'e>(&self, entry: &'e Entry) -> Option<(&'e str, VersionTag)> {
        if entry.kind != EntryKind::File || entry.name.starts_with('.') {
            return None;
        }
        split_versioned_name(&entry.name, &self.extension)
    }
}

/// A single, non-special path component.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
