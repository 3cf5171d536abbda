//! # Diagnostics
//!
//! Lookups against the catalog are best-effort: a missing domain, an
//! unreadable file or a directory that cannot be listed never aborts the
//! call. Instead the operation returns a [`Scanned`] value whose
//! `diagnostics` list says what went wrong, so callers can decide whether
//! to care.
//!
//! Every diagnostic is also emitted as a `tracing` warning when it is
//! recorded.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A non-fatal problem found while answering a query.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("Domain directory not found: {domain}")]
    DomainNotFound { domain: String },

    #[error("No prompts found for {domain}/{use_case}")]
    UseCaseNotFound { domain: String, use_case: String },

    #[error("Version {version} not found for {domain}/{use_case}")]
    VersionNotFound {
        domain: String,
        use_case: String,
        version: String,
    },

    #[error("Error loading prompt file {}: {message}", .path.display())]
    FileRead { path: PathBuf, message: String },

    #[error("Error reading metadata of {}: {message}", .path.display())]
    FileStat { path: PathBuf, message: String },

    #[error("Error listing {}: {message}", .path.display())]
    Enumeration { path: PathBuf, message: String },
}

/// A query result together with the diagnostics collected while producing it.
#[derive(Debug, Clone, Serialize)]
pub struct Scanned<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Scanned<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// A result carrying a single diagnostic.
    pub fn with_diagnostic(value: T, diagnostic: Diagnostic) -> Self {
        let mut scanned = Self::new(value);
        scanned.push(diagnostic);
        scanned
    }

    /// Records a diagnostic and logs it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "prompt registry");
        self.diagnostics.push(diagnostic);
    }

    /// Appends diagnostics that were already logged by another `Scanned`.
    pub fn absorb<U>(&mut self, other: Scanned<U>) -> U {
        self.diagnostics.extend(other.diagnostics);
        other.value
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scanned<U> {
        Scanned {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
