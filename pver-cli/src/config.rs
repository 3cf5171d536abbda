use crate::constants::PVER_CLI;
use confy::ConfyError;
use pver_core::PromptRegistry;
use serde::{Deserialize, Serialize};
use std::env::home_dir;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct PverCliConfig {
    pub base_path: String,
    pub extension: String,
}

impl Default for PverCliConfig {
    fn default() -> Self {
        let base_path = home_dir()
            .map(|p| p.join("pver").join("prompts"))
            .unwrap_or_else(|| PathBuf::from("pver/prompts"));

        Self {
            base_path: base_path.display().to_string(),
            extension: String::from(".md"),
        }
    }
}

impl PverCliConfig {
    pub fn load() -> Result<PverCliConfig, ConfyError> {
        confy::load(PVER_CLI, None)
    }

    /// Command-line values take precedence over the stored configuration.
    pub fn override_with(mut self, base_path: Option<String>, extension: Option<String>) -> Self {
        if let Some(base_path) = base_path {
            self.base_path = base_path;
        }
        if let Some(extension) = extension {
            self.extension = extension;
        }
        self
    }
}

pub fn open_registry(config: &PverCliConfig) -> Result<PromptRegistry, pver_core::RegistryError> {
    Ok(PromptRegistry::open(PathBuf::from(&config.base_path))?.with_extension(&config.extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PverCliConfig::default();
        assert!(config.base_path.ends_with("prompts"));
        assert_eq!(config.extension, ".md");
    }

    #[test]
    fn test_override_with() {
        let config = PverCliConfig::default()
            .override_with(Some("/tmp/prompts".to_string()), None);
        assert_eq!(config.base_path, "/tmp/prompts");
        assert_eq!(config.extension, ".md");

        let config = config.override_with(None, Some("txt".to_string()));
        assert_eq!(config.base_path, "/tmp/prompts");
        assert_eq!(config.extension, "txt");
    }

    #[test]
    fn test_open_registry() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("ops")).unwrap();
        std::fs::write(temp_dir.path().join("ops").join("x_v1.txt"), "").unwrap();

        let config = PverCliConfig {
            base_path: temp_dir.path().display().to_string(),
            extension: "txt".to_string(),
        };
        let registry = open_registry(&config).unwrap();

        assert_eq!(registry.list_use_cases("ops").value, vec!["x"]);
    }

    #[test]
    fn test_open_registry_missing_path() {
        let config = PverCliConfig {
            base_path: "/non/existent/path".to_string(),
            extension: ".md".to_string(),
        };
        assert!(open_registry(&config).is_err());
    }
}
