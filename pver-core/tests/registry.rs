use pver_core::{Diagnostic, MetadataValue, PromptRegistry, RegistryError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TECHNICAL_DOC_V1: &str = "# Energy Systems Technical Documentation Prompt v1.0

## Prompt Type
Technical Documentation Generation

## Business Unit
Energy Systems

## Version
1.0

## Prompt Content

```
Generate technical documentation for energy systems.
Include basic specifications and maintenance procedures.
```

## Status
Active
";

const TECHNICAL_DOC_V2: &str = "# Energy Systems Technical Documentation Prompt v2.0

## Prompt Type
Technical Documentation Generation (Enhanced)

## Business Unit
Energy Systems

## Version
2.0

## Prompt Content

```
You are a technical documentation specialist for enterprise systems.
Generate comprehensive technical documentation for energy equipment.

Requirements:
1. Technical specifications
2. Installation procedures
3. Maintenance schedules
4. Safety considerations
```

## Status
Active (Recommended)
";

const EMAIL_RESPONSE_V1: &str = "# Customer Operations Email Response Prompt v1.0

## Prompt Type
Customer Service Email Response

## Business Unit
Customer Operations

## Version
1.0

## Prompt Content

```
Craft a professional customer service email response.
Address the customer's concern with empathy and provide solutions.
```

## Status
Active
";

fn write(base: &Path, relative: &str, content: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn prompt_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();
    write(base, "energy_systems/technical_doc_v1.md", TECHNICAL_DOC_V1);
    write(base, "energy_systems/technical_doc_v2.md", TECHNICAL_DOC_V2);
    write(base, "customer_ops/email_response_v1.md", EMAIL_RESPONSE_V1);
    temp_dir
}

#[test]
fn test_open_missing_directory_fails() {
    let result = PromptRegistry::open("/non/existent/path");
    assert!(matches!(result, Err(RegistryError::StorageNotFound(_))));
}

#[test]
fn test_list_available_domains() {
    let temp_dir = prompt_tree();
    fs::write(temp_dir.path().join("README.md"), "stray file").unwrap();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let domains = registry.list_available_domains();

    assert!(domains.is_clean());
    assert_eq!(domains.value, vec!["customer_ops", "energy_systems"]);
}

#[test]
fn test_list_use_cases() {
    let temp_dir = prompt_tree();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    assert_eq!(registry.list_use_cases("energy_systems").value, vec!["technical_doc"]);
    assert_eq!(registry.list_use_cases("customer_ops").value, vec!["email_response"]);
    assert!(registry.list_use_cases("non_existent").value.is_empty());
}

#[test]
fn test_get_latest_prompt() {
    let temp_dir = prompt_tree();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let latest = registry.get_latest_prompt("energy_systems", "technical_doc");

    assert!(latest.is_clean());
    let prompt = latest.value.unwrap();
    assert_eq!(prompt.domain, "energy_systems");
    assert_eq!(prompt.use_case, "technical_doc");
    assert_eq!(prompt.version, "2");
    assert!(prompt.content.contains("You are a technical documentation specialist"));
    assert_eq!(
        prompt.file_path,
        temp_dir.path().join("energy_systems").join("technical_doc_v2.md")
    );
}

#[test]
fn test_get_latest_prompt_missing_use_case() {
    let temp_dir = prompt_tree();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let latest = registry.get_latest_prompt("energy_systems", "non_existent");

    assert!(latest.value.is_none());
    assert_eq!(
        latest.diagnostics,
        vec![Diagnostic::UseCaseNotFound {
            domain: "energy_systems".to_string(),
            use_case: "non_existent".to_string(),
        }]
    );
}

#[test]
fn test_get_prompt_versions() {
    let temp_dir = prompt_tree();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let versions = registry.get_prompt_versions("energy_systems", "technical_doc").value;

    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].version, "2");
    assert_eq!(versions[1].version, "1");
    assert_eq!(versions[0].size_bytes, TECHNICAL_DOC_V2.len() as u64);
    assert_eq!(
        versions[1].file_path,
        temp_dir.path().join("energy_systems").join("technical_doc_v1.md")
    );
}

#[test]
fn test_dotted_versions() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "ops/x_v1.0.md", "# X 1.0\n");
    write(temp_dir.path(), "ops/x_v1.5.md", "# X 1.5\n");
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let latest = registry.get_latest_prompt("ops", "x").value.unwrap();

    assert_eq!(latest.version, "1.5");
    assert_eq!(latest.title(), Some("X 1.5"));
}

#[test]
fn test_many_versions() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..100 {
        let content = format!(
            "# Test Prompt v{i}.0\n## Version\n{i}.0\n## Prompt Content\n```\n\
             This is test prompt number {i} with some content.\n```\n"
        );
        write(temp_dir.path(), &format!("test_domain/test_prompt_v{i}.md"), &content);
    }
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let latest = registry.get_latest_prompt("test_domain", "test_prompt").value.unwrap();
    assert_eq!(latest.version, "99");
    assert_eq!(latest.content, "This is test prompt number 99 with some content.");

    let versions = registry.get_prompt_versions("test_domain", "test_prompt").value;
    assert_eq!(versions.len(), 100);
    assert_eq!(versions.last().unwrap().version, "0");
}

#[test]
fn test_prompt_metadata_parsing() {
    let temp_dir = prompt_tree();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let prompt = registry
        .get_latest_prompt("energy_systems", "technical_doc")
        .value
        .unwrap();

    assert_eq!(
        prompt.title(),
        Some("Energy Systems Technical Documentation Prompt v2.0")
    );
    assert_eq!(
        prompt.metadata.get("prompt_type"),
        Some(&MetadataValue::Scalar(
            "Technical Documentation Generation (Enhanced)".to_string()
        ))
    );
    assert_eq!(
        prompt.metadata.get("status").and_then(MetadataValue::as_scalar),
        Some("Active (Recommended)")
    );
}

#[test]
fn test_content_extraction() {
    let temp_dir = prompt_tree();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let prompt = registry
        .get_latest_prompt("customer_ops", "email_response")
        .value
        .unwrap();

    assert!(prompt.content.contains("Craft a professional customer service email"));
    assert!(!prompt.content.contains("```"));
}

#[test]
fn test_raw_content_is_byte_identical() {
    let temp_dir = prompt_tree();
    let weird = "# Odd\r\n\n  ## Indented heading  \n```\nno prompt section\n";
    write(temp_dir.path(), "customer_ops/odd_v3.md", weird);
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let prompt = registry.get_latest_prompt("customer_ops", "odd").value.unwrap();
    assert_eq!(prompt.raw_content, weird);

    let on_disk = fs::read_to_string(&prompt.file_path).unwrap();
    assert_eq!(prompt.raw_content, on_disk);
}

#[test]
fn test_unreadable_file_is_reported_not_raised() {
    let temp_dir = prompt_tree();
    fs::write(
        temp_dir.path().join("customer_ops").join("email_response_v2.md"),
        [0xff, 0xfe, 0xfd],
    )
    .unwrap();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();

    let latest = registry.get_latest_prompt("customer_ops", "email_response");

    let prompt = latest.value.as_ref().unwrap();
    assert_eq!(prompt.version, "2");
    assert!(prompt.error.is_some());
    assert!(matches!(latest.diagnostics[0], Diagnostic::FileRead { .. }));

    // The older revision stays reachable.
    let older = registry.get_prompt_version("customer_ops", "email_response", "1");
    assert!(older.is_clean());
    assert!(older.value.unwrap().content.contains("Craft a professional"));
}

#[test]
fn test_files_added_between_calls_are_seen() {
    let temp_dir = prompt_tree();
    let registry = PromptRegistry::open(temp_dir.path()).unwrap();
    assert_eq!(
        registry.get_latest_prompt("customer_ops", "email_response").value.unwrap().version,
        "1"
    );

    write(temp_dir.path(), "customer_ops/email_response_v1.1.md", EMAIL_RESPONSE_V1);

    assert_eq!(
        registry.get_latest_prompt("customer_ops", "email_response").value.unwrap().version,
        "1.1"
    );
}

#[test]
fn test_demo_prompt_tree() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/prompts");
    let registry = PromptRegistry::open(demos).unwrap();

    assert_eq!(
        registry.list_available_domains().value,
        vec!["customer_ops", "energy_systems"]
    );

    let email = registry
        .get_latest_prompt("customer_ops", "email_response")
        .value
        .unwrap();
    assert_eq!(email.version, "1.5");
    assert_eq!(
        email.metadata.get("change_log"),
        Some(&MetadataValue::List(vec![
            "Shorter replies".to_string(),
            "Escalation path for refunds".to_string(),
        ]))
    );

    let versions: Vec<String> = registry
        .get_prompt_versions("customer_ops", "email_response")
        .value
        .into_iter()
        .map(|record| record.version)
        .collect();
    assert_eq!(versions, vec!["1.5", "1.0"]);
}
