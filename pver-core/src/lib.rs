//! # pver Core
//!
//! This crate provides the core functionality for pver, a registry of versioned prompts.
//!
//! Prompts live in a directory tree, one directory per business domain and one file per
//! revision of a use case (`<domain>/<use_case>_v<version>.md`). pver finds the latest
//! revision of a prompt, lists the stored revisions and parses prompt files into metadata
//! and content. It only ever reads the tree.
//!
//! # Modules
//!
//! - [`registry`] - The [`PromptRegistry`] façade used by callers
//! - [`catalog`] - Domain, use case and version discovery
//! - [`version`] - Version tag parsing and ordering
//! - [`parser`] - Prompt file parsing
//! - [`artifact`] - Loaded prompts and version records
//! - [`storage`] - The storage trait the catalog reads through
//! - [`file_storage`] - Filesystem storage
//! - [`memory_storage`] - In-memory storage
//! - [`diagnostics`] - Non-fatal problems reported alongside results
//! - [`error`] - Errors raised when opening a registry
//!
//! # Examples
//!
//! ```rust
//! use pver_core::PromptRegistry;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! // Create a temporary prompt tree
//! let temp_dir = TempDir::new().unwrap();
//! let domain = temp_dir.path().join("customer_ops");
//! fs::create_dir(&domain).unwrap();
//! let v1 = "# Email v1\n## Prompt Content\n```\nBe kind.\n```\n";
//! let v2 = "# Email v2\n## Prompt Content\n```\nBe kind and brief.\n```\n";
//! fs::write(domain.join("email_response_v1.md"), v1).unwrap();
//! fs::write(domain.join("email_response_v2.md"), v2).unwrap();
//!
//! let registry = PromptRegistry::open(temp_dir.path()).expect("Failed to open registry");
//! let prompt = registry.get_latest_prompt("customer_ops", "email_response").value.unwrap();
//!
//! assert_eq!(prompt.version, "2");
//! assert_eq!(prompt.content, "Be kind and brief.");
//! ```

pub mod artifact;
pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod file_storage;
pub mod memory_storage;
pub mod parser;
pub mod registry;
pub mod storage;
pub mod version;

pub use artifact::{Artifact, Metadata, MetadataValue, VersionRecord};
pub use diagnostics::{Diagnostic, Scanned};
pub use error::RegistryError;
pub use registry::PromptRegistry;
