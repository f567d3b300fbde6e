use anyhow::Context;
use forge_sdd_core::{
    config::Config,
    copy::{copy_directory, copy_file, CopyOptions},
    io, paths,
    toolkit::Toolkit,
    types::{ProjectTemplate, Stage},
    ForgeError,
};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::output::print_json;

/// Version of the forge-sdd binary embedded at compile time.
pub const FORGE_SDD_BINARY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct InitReport {
    name: String,
    path: PathBuf,
    template: ProjectTemplate,
    files: Vec<String>,
}

pub fn run(
    parent: &Path,
    name: Option<&str>,
    template: &str,
    toolkit_dir: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let template: ProjectTemplate = template.parse()?;
    let name = resolve_name(name)?;
    paths::validate_project_name(&name)?;

    let root = parent.join(&name);
    if root.exists() {
        return Err(ForgeError::ProjectExists(root).into());
    }

    let toolkit = Toolkit::locate(toolkit_dir).context("failed to load toolkit")?;
    tracing::info!(
        toolkit = %toolkit.root().display(),
        embedded = toolkit.is_embedded(),
        "initializing project"
    );

    if !json {
        println!("Initializing forge-sdd project: {}", root.display());
    }

    // 1. Directory skeleton
    for dir in paths::PROJECT_DIRS {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    // 2. Prompts, templates, schemas
    let mut written = install_toolkit(&root, &toolkit)?;

    // 3. Generated project files
    written.push(write_generated(
        &root,
        paths::README_MD,
        &readme_content(&name),
    )?);
    written.push(write_generated(&root, paths::GITIGNORE, GITIGNORE_CONTENT)?);
    written.push(write_generated(
        &root,
        paths::VSCODE_SETTINGS,
        &vscode_settings_content()?,
    )?);

    // 4. Config marks the directory as a project; written last
    let mut config = Config::new(&name, template);
    config.toolkit_version = Some(FORGE_SDD_BINARY_VERSION.to_string());
    config.save(&root).context("failed to write config.yaml")?;
    written.push(paths::config_path(&root));

    let files: Vec<String> = written.iter().map(|p| relative(&root, p)).collect();

    if json {
        return print_json(&InitReport {
            name,
            path: root,
            template,
            files,
        });
    }

    for file in &files {
        println!("  created: {file}");
    }

    println!("\nProject initialized successfully.");
    println!("\nNext steps:");
    println!("  1. cd {name}");
    println!("  2. code .            (open in VS Code)");
    println!("  3. Open GitHub Copilot Chat");
    println!("  4. Type: @forge-ideate");
    println!("  5. Describe your app idea");
    println!("\nRead {name}/README.md for the full walkthrough.");

    Ok(())
}

/// Use `name` if given, otherwise ask for one when attached to a terminal.
fn resolve_name(name: Option<&str>) -> anyhow::Result<String> {
    if let Some(name) = name {
        return Ok(name.to_string());
    }
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("project name required: forge-sdd init <NAME>");
    }
    let name: String = dialoguer::Input::new()
        .with_prompt("Project name")
        .default("my-forge-app".to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            paths::validate_project_name(input).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(name)
}

/// Lay the toolkit's stage prompts, base prompts, templates, and schemas into
/// the project at `root`, overwriting earlier copies. Returns every file
/// written. Shared by `init` and `update`.
pub fn install_toolkit(root: &Path, toolkit: &Toolkit) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let prompts_dir = root.join(paths::GITHUB_PROMPTS_DIR);
    for stage in Stage::all() {
        let source = toolkit.stage_prompt(*stage);
        let options = CopyOptions::transformed()
            .with_header(toolkit.relative(&source))
            .with_extension(paths::PROMPT_EXTENSION);
        let target = copy_file(&source, &prompts_dir.join(stage.prompt_filename()), &options)
            .with_context(|| format!("failed to install the {stage} prompt"))?;
        written.push(target);
    }

    let base_dir = root.join(paths::BASE_PROMPTS_DIR);
    for name in paths::BASE_PROMPTS {
        let source = toolkit.base_dir().join(name);
        let options = CopyOptions::transformed().with_header(toolkit.relative(&source));
        let target = copy_file(&source, &base_dir.join(name), &options)
            .with_context(|| format!("failed to install base prompt {name}"))?;
        written.push(target);
    }

    written.extend(
        copy_directory(
            &toolkit.templates_dir(),
            &root.join(paths::TEMPLATES_DIR),
            &CopyOptions::verbatim(),
        )
        .context("failed to install templates")?,
    );
    written.extend(
        copy_directory(
            &toolkit.schemas_dir(),
            &root.join(paths::SCHEMAS_DIR),
            &CopyOptions::verbatim(),
        )
        .context("failed to install schemas")?,
    );

    Ok(written)
}

fn write_generated(root: &Path, rel: &str, content: &str) -> anyhow::Result<PathBuf> {
    let path = root.join(rel);
    io::atomic_write(&path, content.as_bytes())
        .with_context(|| format!("failed to write {rel}"))?;
    Ok(path)
}

/// `path` relative to `root` with `/` separators, for progress lines.
pub fn relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn vscode_settings_content() -> anyhow::Result<String> {
    let settings = serde_json::json!({
        "github.copilot.enable": {
            "*": true,
            "yaml": true,
            "markdown": true,
            "plaintext": false
        },
        "github.copilot.advanced": {},
        "files.associations": {
            "*.prompt.md": "markdown"
        },
        "markdown.validate.enabled": true
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&settings)?))
}

fn readme_content(project_name: &str) -> String {
    README_TEMPLATE.replace("{project_name}", project_name)
}

pub const GITIGNORE_CONTENT: &str = r#"# SDD temporary files
*.draft.md
*.tmp.md
*.wip.md

# Node modules
node_modules/

# Forge
.forge/
.tunnel/
build/
dist/

# OS
.DS_Store
Thumbs.db

# IDE
.vscode/*
!.vscode/settings.json
.idea/

# Logs
*.log
npm-debug.log*
"#;

const README_TEMPLATE: &str = r#"# {project_name}

> Generated by [forge-sdd](https://github.com/4youtest-vsalmeida/forge-sdd-toolkit)

## What is this?

This project follows **Specification-Driven Development (SDD)**: you describe
WHAT you want to build in natural language, and GitHub Copilot walks the Forge
app through its whole lifecycle, writing a document at every stage.

## Project structure

```
{project_name}/
├── .github/prompts/           # Copilot prompts (@forge-ideate, ...)
│   ├── forge-ideate.prompt.md
│   ├── forge-architect.prompt.md
│   ├── forge-plan.prompt.md
│   ├── forge-implement.prompt.md
│   ├── forge-test.prompt.md
│   ├── forge-operate.prompt.md
│   └── _base/                 # Shared rules referenced by the stage prompts
│       ├── system-prompt.md
│       └── decision-framework.md
├── .forge-sdd/
│   ├── config.yaml            # Project settings
│   ├── templates/             # Document templates
│   └── schemas/               # Frontmatter schemas
└── docs/                      # Your SDD documents
```

Files under `.github/prompts/` and `.forge-sdd/` are managed:
`forge-sdd update` overwrites them with the current toolkit.

## The six stages

| Stage | Copilot command | Output |
|-------|-----------------|--------|
| 1. Ideate | `@forge-ideate` | `docs/specification-document.md` |
| 2. Architect | `@forge-architect` | `docs/ADD.md` |
| 3. Plan | `@forge-plan` | `docs/implementation-plan.md` |
| 4. Implement | `@forge-implement` | source code, `manifest.yml` |
| 5. Test | `@forge-test` | test suite, `docs/test-plan.md` |
| 6. Operate | `@forge-operate` | deployment configuration |

## CLI

```bash
forge-sdd prompt ideate               # print a stage prompt (--copy for the clipboard)
forge-sdd template specification      # start a document from its template
forge-sdd validate docs/ADD.md        # check frontmatter against its schema
forge-sdd update                      # refresh prompts, templates, and schemas
```

## Quick start

1. Open this folder in VS Code.
2. Open GitHub Copilot Chat.
3. Type `@forge-ideate` and describe your app idea.
4. Follow the handoff at the end of each stage.

## Learn more

- [Forge platform documentation](https://developer.atlassian.com/platform/forge/)
- [GitHub Copilot](https://github.com/features/copilot)
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn readme_names_the_project() {
        let readme = readme_content("pr-status-panel");
        assert!(readme.starts_with("# pr-status-panel\n"));
        assert!(readme.contains("pr-status-panel/\n"));
        assert!(!readme.contains("{project_name}"));
    }

    #[test]
    fn vscode_settings_is_valid_json() {
        let content = vscode_settings_content().unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["files.associations"]["*.prompt.md"], "markdown");
    }

    #[test]
    fn relative_strips_root() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            relative(root, &root.join(".github/prompts/forge-plan.prompt.md")),
            ".github/prompts/forge-plan.prompt.md"
        );
    }

    #[test]
    fn install_toolkit_lays_out_managed_files() {
        let dir = TempDir::new().unwrap();
        let toolkit = Toolkit::embedded().unwrap();
        let written = install_toolkit(dir.path(), &toolkit).unwrap();

        for stage in Stage::all() {
            assert!(written.contains(&paths::stage_prompt_path(dir.path(), *stage)));
        }
        let ideate =
            std::fs::read_to_string(paths::stage_prompt_path(dir.path(), Stage::Ideate)).unwrap();
        assert!(ideate.starts_with("<!--\n  Generated by forge-sdd from: prompts/commands/forge-ideate.md"));
        assert!(ideate.contains("(_base/system-prompt.md)"));
        forge_sdd_core::validate(&ideate).unwrap();

        assert!(dir
            .path()
            .join(".github/prompts/_base/decision-framework.md")
            .is_file());
        assert!(dir
            .path()
            .join(".forge-sdd/templates/general/documents/ADD-template.md")
            .is_file());
        assert!(dir.path().join(".forge-sdd/schemas/ADD.schema.json").is_file());
    }
}
