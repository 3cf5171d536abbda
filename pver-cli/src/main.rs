mod config;
mod constants;

use crate::config::{PverCliConfig, open_registry};
use crate::constants::{DEFAULT_LOG_FILTER, PVER_CLI};
use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pver_core::{Artifact, VersionRecord};
use std::io;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version,
display_name = "pver",
bin_name = "pver",
about = "A registry of versioned prompts",
long_about = "Finds the latest version of a prompt, lists stored versions and \
prints prompt content from a directory tree of versioned markdown files", )]
struct Args {
    /// Root of the prompt tree, overriding the configured one.
    #[arg(short = 'p', long)]
    storage_path: Option<String>,

    /// Prompt file suffix, overriding the configured one.
    #[arg(short = 'e', long)]
    extension: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// List business domains.
    Domains,
    /// List the use cases of a domain.
    UseCases {
        #[arg(short = 'd', long)]
        domain: String,
    },
    /// List the stored versions of a prompt, newest first.
    Versions {
        #[arg(short = 'd', long)]
        domain: String,
        #[arg(short = 'u', long)]
        use_case: String,
    },
    /// Print a prompt, by default its latest version.
    Get {
        #[arg(short = 'd', long)]
        domain: String,
        #[arg(short = 'u', long)]
        use_case: String,
        /// Exact version to load instead of the latest, e.g. `1.5`.
        #[arg(short = 'r', long)]
        revision: Option<String>,
        /// Print the whole file instead of the prompt content.
        #[arg(long)]
        raw: bool,
        /// Also copy the prompt content to the clipboard.
        #[arg(short = 'c', long)]
        copy: bool,
    },
    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    if let Commands::Completions { shell } = &args.cmd {
        clap_complete::generate(*shell, &mut Args::command(), PVER_CLI, &mut io::stdout());
        return Ok(());
    }

    let config = match PverCliConfig::load() {
        Ok(config) => config.override_with(args.storage_path.clone(), args.extension.clone()),
        Err(err) => {
            eprintln!("Error: Problem loading config: {err}");
            process::exit(exitcode::CONFIG);
        }
    };
    debug!(
        base_path = %config.base_path,
        extension = %config.extension,
        "Opening prompt registry"
    );
    let registry = match open_registry(&config) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(exitcode::CONFIG);
        }
    };

    match &args.cmd {
        Commands::Domains => print_names(&registry.list_available_domains().value, args.json)?,
        Commands::UseCases { domain } => {
            print_names(&registry.list_use_cases(domain).value, args.json)?
        }
        Commands::Versions { domain, use_case } => {
            let versions = registry.get_prompt_versions(domain, use_case).value;
            if versions.is_empty() {
                info!(%domain, %use_case, "No versions found");
                process::exit(exitcode::NOINPUT);
            }
            print_versions(&versions, args.json)?;
        }
        Commands::Get {
            domain,
            use_case,
            revision,
            raw,
            copy,
        } => {
            let scanned = match revision {
                Some(revision) => registry.get_prompt_version(domain, use_case, revision),
                None => registry.get_latest_prompt(domain, use_case),
            };
            let Some(artifact) = scanned.value else {
                info!(%domain, %use_case, ?revision, "No matching prompt found");
                process::exit(exitcode::NOINPUT);
            };
            if let Some(error) = &artifact.error {
                anyhow::bail!("Failed to read {}: {error}", artifact.file_path.display());
            }

            print_artifact(&artifact, args.json, *raw)?;
            if *copy {
                copy_to_clipboard(&artifact.content)?;
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_names(names: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn print_versions(versions: &[VersionRecord], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(versions)?);
        return Ok(());
    }
    for record in versions {
        println!(
            "{}\t{}\t{} bytes\t{}",
            record.version,
            record.modified_date.format("%Y-%m-%d %H:%M:%S"),
            record.size_bytes,
            record.file_path.display()
        );
    }
    Ok(())
}

fn print_artifact(artifact: &Artifact, json: bool, raw: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(artifact)?);
    } else if raw {
        print!("{}", artifact.raw_content);
    } else {
        println!("{}", artifact.content);
    }
    Ok(())
}

fn copy_to_clipboard(content: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to access the clipboard")?;
    clipboard
        .set_text(content.to_string())
        .context("Failed to copy prompt to the clipboard")?;
    Ok(())
}
