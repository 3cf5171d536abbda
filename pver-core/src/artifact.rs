//! # Artifacts
//!
//! Data returned by the registry: a loaded prompt ([`Artifact`]) and the
//! storage facts about one stored revision ([`VersionRecord`]).

use crate::parser::ParsedPrompt;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Parsed metadata, keyed by normalized section name (plus `title`).
pub type Metadata = BTreeMap<String, MetadataValue>;

/// The lines collected under one metadata heading.
///
/// A section with a single line collapses to [`MetadataValue::Scalar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Scalar(String),
    List(Vec<String>),
}

impl MetadataValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            MetadataValue::Scalar(value) => Some(value),
            MetadataValue::List(_) => None,
        }
    }

    /// All lines of the value, whichever shape it has.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            MetadataValue::Scalar(value) => vec![value.as_str()],
            MetadataValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// One prompt file, located by the catalog and decoded by the parser.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub domain: String,
    pub use_case: String,
    pub version: String,
    pub metadata: Metadata,
    pub content: String,
    /// The file exactly as read.
    pub raw_content: String,
    pub loaded_at: DateTime<Local>,
    pub file_path: PathBuf,
    /// Set when the file could not be read; metadata and content are empty then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Artifact {
    pub fn parsed(
        domain: &str,
        use_case: &str,
        version: &str,
        file_path: PathBuf,
        raw_content: String,
    ) -> Artifact {
        let ParsedPrompt { metadata, content } = crate::parser::parse(&raw_content);
        Artifact {
            domain: domain.to_string(),
            use_case: use_case.to_string(),
            version: version.to_string(),
            metadata,
            content,
            raw_content,
            loaded_at: Local::now(),
            file_path,
            error: None,
        }
    }

    pub fn unreadable(
        domain: &str,
        use_case: &str,
        version: &str,
        file_path: PathBuf,
        error: String,
    ) -> Artifact {
        Artifact {
            domain: domain.to_string(),
            use_case: use_case.to_string(),
            version: version.to_string(),
            metadata: Metadata::new(),
            content: String::new(),
            raw_content: String::new(),
            loaded_at: Local::now(),
            file_path,
            error: Some(error),
        }
    }

    /// The `# ` heading of the file, if it had one.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(MetadataValue::as_scalar)
    }

    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }
}

/// Storage facts about one revision of a use case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRecord {
    pub version: String,
    pub file_path: PathBuf,
    pub created_date: DateTime<Local>,
    pub modified_date: DateTime<Local>,
    pub size_bytes: u64,
}
