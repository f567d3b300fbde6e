use forge_sdd_core::{io, paths, types::Stage};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::clipboard;
use crate::output::{print_json, print_rule};

#[derive(Serialize)]
struct PromptReport {
    stage: Stage,
    path: PathBuf,
    content: String,
    /// Whether the clipboard copy succeeded; absent without `--copy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    copied: Option<bool>,
}

pub fn run(root: &Path, stage: &str, copy: bool, json: bool) -> anyhow::Result<()> {
    let stage: Stage = stage.parse()?;
    let path = paths::stage_prompt_path(root, stage);
    if !path.is_file() {
        anyhow::bail!(
            "prompt not found: {} (run inside a forge-sdd project, or 'forge-sdd update' to restore it)",
            path.display()
        );
    }
    let content = io::read_text(&path)?;

    if !json {
        println!("Prompt: {} stage\n", stage.as_str().to_uppercase());
        print_rule();
        println!("{content}");
        print_rule();
    }

    let copied = copy.then(|| match clipboard::copy(&content) {
        Ok(()) => true,
        Err(e) => {
            // A clipboard failure never fails the command.
            tracing::warn!("clipboard copy failed: {e:#}");
            eprintln!("warning: could not copy to clipboard: {e:#}");
            false
        }
    });

    if json {
        return print_json(&PromptReport {
            stage,
            path,
            content,
            copied,
        });
    }

    match copied {
        Some(true) => println!("\nPrompt copied to clipboard."),
        Some(false) => {}
        None => {
            println!("\nTip: paste this prompt into GitHub Copilot Chat, or rerun with --copy.")
        }
    }
    Ok(())
}
