//! The toolkit: the prompts, templates, and schemas copied into projects.
//!
//! A release binary carries the toolkit inside itself and unpacks it into a
//! temporary directory for the duration of a command, so the copy primitives
//! always work from real files. Toolkit authors can point at a working tree
//! instead with `--toolkit` / `FORGE_SDD_TOOLKIT`.

use crate::error::{ForgeError, Result};
use crate::io;
use crate::paths;
use crate::types::Stage;
use rust_embed::Embed;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/../../structure/"]
struct EmbeddedToolkit;

#[derive(Debug)]
pub struct Toolkit {
    root: PathBuf,
    // Keeps the unpacked embedded toolkit alive; removed on drop.
    unpacked: Option<TempDir>,
}

impl Toolkit {
    /// Use `explicit` if given, otherwise unpack the embedded toolkit.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.join(paths::TOOLKIT_PROMPTS_DIR).is_dir() {
            return Err(ForgeError::ToolkitNotFound(dir.to_path_buf()));
        }
        Ok(Self {
            root: dir.to_path_buf(),
            unpacked: None,
        })
    }

    pub fn embedded() -> Result<Self> {
        let tmp = tempfile::Builder::new().prefix("forge-sdd-toolkit-").tempdir()?;
        let mut count = 0usize;
        for file in EmbeddedToolkit::iter() {
            if let Some(content) = EmbeddedToolkit::get(&file) {
                io::atomic_write(&tmp.path().join(file.as_ref()), &content.data)?;
                count += 1;
            }
        }
        tracing::debug!(files = count, dir = %tmp.path().display(), "unpacked embedded toolkit");
        if !tmp.path().join(paths::TOOLKIT_PROMPTS_DIR).is_dir() {
            return Err(ForgeError::ToolkitNotFound(tmp.path().to_path_buf()));
        }
        Ok(Self {
            root: tmp.path().to_path_buf(),
            unpacked: Some(tmp),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_embedded(&self) -> bool {
        self.unpacked.is_some()
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.root.join(paths::TOOLKIT_PROMPTS_DIR)
    }

    pub fn commands_dir(&self) -> PathBuf {
        self.root.join(paths::TOOLKIT_COMMANDS_DIR)
    }

    pub fn base_dir(&self) -> PathBuf {
        self.root.join(paths::TOOLKIT_BASE_DIR)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(paths::TOOLKIT_TEMPLATES_DIR)
    }

    pub fn schemas_dir(&self) -> PathBuf {
        self.root.join(paths::TOOLKIT_SCHEMAS_DIR)
    }

    pub fn stage_prompt(&self, stage: Stage) -> PathBuf {
        self.commands_dir().join(stage.prompt_filename())
    }

    /// `path` relative to the toolkit root with `/` separators, for
    /// provenance headers and reports.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Every markdown file under `prompts/`, sorted.
    pub fn prompt_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.prompts_dir();
        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry.map_err(|source| ForgeError::Walk {
                path: dir.clone(),
                source,
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|e| e == "md")
            {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_toolkit_has_every_stage_prompt() {
        let toolkit = Toolkit::embedded().unwrap();
        assert!(toolkit.is_embedded());
        for stage in Stage::all() {
            assert!(
                toolkit.stage_prompt(*stage).is_file(),
                "missing prompt for {stage}"
            );
        }
        for base in paths::BASE_PROMPTS {
            assert!(toolkit.base_dir().join(base).is_file(), "missing {base}");
        }
    }

    #[test]
    fn embedded_toolkit_has_templates_and_schemas() {
        let toolkit = Toolkit::embedded().unwrap();
        for doc in crate::types::DocType::all() {
            assert!(toolkit
                .templates_dir()
                .join("general/documents")
                .join(doc.template_filename())
                .is_file());
            assert!(toolkit.schemas_dir().join(doc.schema_filename()).is_file());
        }
    }

    #[test]
    fn unpacked_dir_is_removed_on_drop() {
        let toolkit = Toolkit::embedded().unwrap();
        let root = toolkit.root().to_path_buf();
        assert!(root.is_dir());
        drop(toolkit);
        assert!(!root.exists());
    }

    #[test]
    fn from_dir_requires_prompts() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            Toolkit::from_dir(dir.path()),
            Err(ForgeError::ToolkitNotFound(_))
        ));
        std::fs::create_dir_all(dir.path().join("prompts")).unwrap();
        let toolkit = Toolkit::from_dir(dir.path()).unwrap();
        assert!(!toolkit.is_embedded());
    }

    #[test]
    fn relative_uses_forward_slashes() {
        let toolkit = Toolkit::embedded().unwrap();
        let path = toolkit.stage_prompt(Stage::Plan);
        assert_eq!(toolkit.relative(&path), "prompts/commands/forge-plan.md");
    }

    #[test]
    fn prompt_files_lists_commands_and_base() {
        let toolkit = Toolkit::embedded().unwrap();
        let files = toolkit.prompt_files().unwrap();
        assert_eq!(files.len(), Stage::all().len() + paths::BASE_PROMPTS.len());
    }
}
