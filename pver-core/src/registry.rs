//! # Prompt Registry
//!
//! The entry point for callers. [`PromptRegistry`] combines the
//! [`Catalog`] (which file?) with the parser (what does it say?).
//!
//! Lookups return [`Scanned`] values: the answer plus any diagnostics. An
//! absent prompt is `None`, never an error.

use crate::artifact::{Artifact, VersionRecord};
use crate::catalog::{Catalog, Located};
use crate::diagnostics::{Diagnostic, Scanned};
use crate::error::Result;
use crate::file_storage::FsStorage;
use crate::storage::Storage;
use std::path::PathBuf;

pub struct PromptRegistry<S: Storage = FsStorage> {
    catalog: Catalog<S>,
}

impl PromptRegistry<FsStorage> {
    /// Opens the prompt tree rooted at `base_path`.
    ///
    /// # Returns
    ///
    /// * `Ok(PromptRegistry)` - If `base_path` is an existing directory.
    /// * `RegistryError::StorageNotFound` - If `base_path` does not exist.
    /// * `RegistryError::StorageNotADirectory` - If `base_path` is not a directory.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(FsStorage::new(base_path))
    }
}

impl<S: Storage> PromptRegistry<S> {
    pub fn new(storage: S) -> Result<Self> {
        Ok(Self {
            catalog: Catalog::new(storage)?,
        })
    }

    /// Uses `extension` instead of `.md` as the prompt file suffix.
    pub fn with_extension(self, extension: &str) -> Self {
        Self {
            catalog: self.catalog.with_extension(extension),
        }
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    /// Loads the highest version of a prompt.
    ///
    /// # Arguments
    ///
    /// * `domain` - Business domain, e.g. `energy_systems`.
    /// * `use_case` - Use case within the domain, e.g. `technical_doc`.
    ///
    /// # Returns
    ///
    /// * `Some(Artifact)` - The parsed prompt. If the file could not be read, the artifact
    ///   has its `error` set and a `FileRead` diagnostic is attached.
    /// * `None` - If the domain or use case does not exist.
    pub fn get_latest_prompt(&self, domain: &str, use_case: &str) -> Scanned<Option<Artifact>> {
        let mut scanned = Scanned::new(None);
        if let Some(located) = scanned.absorb(self.catalog.find_latest(domain, use_case)) {
            let artifact = scanned.absorb(self.load(domain, use_case, &located));
            scanned.value = Some(artifact);
        }
        scanned
    }

    /// Loads one specific version of a prompt, e.g. to roll back or to compare revisions.
    ///
    /// `version` must match the file name exactly: `"1.0"` does not find `x_v1.md`.
    pub fn get_prompt_version(
        &self,
        domain: &str,
        use_case: &str,
        version: &str,
    ) -> Scanned<Option<Artifact>> {
        let mut scanned = Scanned::new(None);
        let found = self.catalog.find_version(domain, use_case, version);
        if let Some(located) = scanned.absorb(found) {
            let artifact = scanned.absorb(self.load(domain, use_case, &located));
            scanned.value = Some(artifact);
        }
        scanned
    }

    pub fn list_available_domains(&self) -> Scanned<Vec<String>> {
        self.catalog.list_domains()
    }

    pub fn list_use_cases(&self, domain: &str) -> Scanned<Vec<String>> {
        self.catalog.list_use_cases(domain)
    }

    /// All versions of a prompt with their file metadata, newest first.
    pub fn get_prompt_versions(&self, domain: &str, use_case: &str) -> Scanned<Vec<VersionRecord>> {
        self.catalog.list_versions(domain, use_case)
    }

    fn load(&self, domain: &str, use_case: &str, located: &Located) -> Scanned<Artifact> {
        let storage = self.catalog.storage();
        let file_path = storage.locate(&located.path);
        let version = located.version.as_str();

        match storage.read_to_string(&located.path) {
            Ok(raw_content) => Scanned::new(Artifact::parsed(
                domain,
                use_case,
                version,
                file_path,
                raw_content,
            )),
            Err(err) => Scanned::with_diagnostic(
                Artifact::unreadable(domain, use_case, version, file_path.clone(), err.to_string()),
                Diagnostic::FileRead {
                    path: file_path,
                    message: err.to_string(),
                },
            ),
        }
    }
}
