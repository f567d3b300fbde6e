use anyhow::Context;
use forge_sdd_core::{config::Config, io, paths, toolkit::Toolkit};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::init::{
    install_toolkit, relative, vscode_settings_content, FORGE_SDD_BINARY_VERSION,
    GITIGNORE_CONTENT,
};
use crate::output::print_json;

#[derive(Serialize)]
struct UpdateReport {
    root: PathBuf,
    previous_version: Option<String>,
    toolkit_version: &'static str,
    updated: Vec<String>,
    created: Vec<String>,
}

/// `forge-sdd update`: refresh managed prompts, templates, and schemas and
/// stamp the current binary version.
///
/// Requires an initialized project (`.forge-sdd/config.yaml` must exist).
/// Never touches `docs/`, README.md, or user-edited config fields.
pub fn run(root: &Path, toolkit_dir: Option<&Path>, json: bool) -> anyhow::Result<()> {
    if !paths::config_path(root).exists() {
        anyhow::bail!(
            "not initialized: run 'forge-sdd init' first (no .forge-sdd/config.yaml found in {})",
            root.display()
        );
    }

    let config = Config::load(root).context("failed to load config.yaml")?;
    let previous_version = config.toolkit_version.clone();

    if !json {
        println!("Updating forge-sdd project: {}", root.display());
        println!(
            "  previous: {}  →  current: {FORGE_SDD_BINARY_VERSION}",
            previous_version.as_deref().unwrap_or("unversioned")
        );
    }

    let toolkit = Toolkit::locate(toolkit_dir).context("failed to load toolkit")?;

    // Directories introduced by later versions
    for dir in paths::PROJECT_DIRS {
        io::ensure_dir(&root.join(dir))?;
    }

    let updated: Vec<String> = install_toolkit(root, &toolkit)?
        .iter()
        .map(|p| relative(root, p))
        .collect();

    // User-owned once created
    let settings = vscode_settings_content()?;
    let mut created = Vec::new();
    for (rel, content) in [
        (paths::VSCODE_SETTINGS, settings.as_str()),
        (paths::GITIGNORE, GITIGNORE_CONTENT),
    ] {
        if io::write_if_missing(&root.join(rel), content.as_bytes())? {
            created.push(rel.to_string());
        }
    }

    let stamped = stamp_toolkit_version(root, config)?;

    if json {
        return print_json(&UpdateReport {
            root: root.to_path_buf(),
            previous_version,
            toolkit_version: FORGE_SDD_BINARY_VERSION,
            updated,
            created,
        });
    }

    println!();
    for file in &updated {
        println!("  updated: {file}");
    }
    for file in &created {
        println!("  created: {file}");
    }
    if stamped {
        println!(
            "  stamped: {} (toolkit_version {} → {FORGE_SDD_BINARY_VERSION})",
            paths::CONFIG_FILE,
            previous_version.as_deref().unwrap_or("none")
        );
    }

    println!("\nforge-sdd project updated to v{FORGE_SDD_BINARY_VERSION}.");
    Ok(())
}

/// Stamp the current binary version into `.forge-sdd/config.yaml`.
/// Only writes if the stored version differs; returns whether it wrote.
fn stamp_toolkit_version(root: &Path, config: Config) -> anyhow::Result<bool> {
    if config.toolkit_version.as_deref() == Some(FORGE_SDD_BINARY_VERSION) {
        return Ok(false);
    }
    let mut updated = config;
    updated.toolkit_version = Some(FORGE_SDD_BINARY_VERSION.to_string());
    updated.save(root).context("failed to save config.yaml")?;
    Ok(true)
}
