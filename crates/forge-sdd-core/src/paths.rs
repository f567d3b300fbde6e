use crate::error::{ForgeError, Result};
use crate::types::{DocType, Stage};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Project layout
// ---------------------------------------------------------------------------

pub const FORGE_DIR: &str = ".forge-sdd";
pub const TEMPLATES_DIR: &str = ".forge-sdd/templates";
pub const SCHEMAS_DIR: &str = ".forge-sdd/schemas";
pub const CONFIG_FILE: &str = ".forge-sdd/config.yaml";

pub const GITHUB_PROMPTS_DIR: &str = ".github/prompts";
pub const BASE_PROMPTS_DIR: &str = ".github/prompts/_base";

pub const DOCS_DIR: &str = "docs";
pub const VSCODE_DIR: &str = ".vscode";
pub const VSCODE_SETTINGS: &str = ".vscode/settings.json";
pub const README_MD: &str = "README.md";
pub const GITIGNORE: &str = ".gitignore";

/// Extension given to stage prompts so Copilot picks them up.
pub const PROMPT_EXTENSION: &str = ".prompt.md";

/// Directories every project gets, relative to the project root.
pub const PROJECT_DIRS: &[&str] = &[
    BASE_PROMPTS_DIR,
    TEMPLATES_DIR,
    SCHEMAS_DIR,
    DOCS_DIR,
    VSCODE_DIR,
];

// ---------------------------------------------------------------------------
// Toolkit layout
// ---------------------------------------------------------------------------

pub const TOOLKIT_PROMPTS_DIR: &str = "prompts";
pub const TOOLKIT_COMMANDS_DIR: &str = "prompts/commands";
pub const TOOLKIT_BASE_DIR: &str = "prompts/base";
pub const TOOLKIT_TEMPLATES_DIR: &str = "templates";
pub const TOOLKIT_SCHEMAS_DIR: &str = "schemas";

/// Base prompts shipped alongside the stage prompts.
pub const BASE_PROMPTS: &[&str] = &["system-prompt.md", "decision-framework.md"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Installed stage prompt, e.g. `.github/prompts/forge-plan.prompt.md`.
pub fn stage_prompt_path(root: &Path, stage: Stage) -> PathBuf {
    root.join(GITHUB_PROMPTS_DIR)
        .join(format!("forge-{}{PROMPT_EXTENSION}", stage.as_str()))
}

pub fn template_path(root: &Path, doc_type: DocType) -> PathBuf {
    root.join(TEMPLATES_DIR)
        .join("general/documents")
        .join(doc_type.template_filename())
}

pub fn schema_path(root: &Path, doc_type: DocType) -> PathBuf {
    root.join(SCHEMAS_DIR).join(doc_type.schema_filename())
}

pub fn docs_dir(root: &Path) -> PathBuf {
    root.join(DOCS_DIR)
}

// ---------------------------------------------------------------------------
// Project name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").unwrap())
}

pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.len() > 214 || !name_re().is_match(name) {
        return Err(ForgeError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
