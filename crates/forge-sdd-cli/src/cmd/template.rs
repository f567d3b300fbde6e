use anyhow::Context;
use forge_sdd_core::{
    copy::{copy_file, CopyOptions},
    paths,
    types::DocType,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::output::print_json;

#[derive(Serialize)]
struct TemplateReport {
    doc_type: DocType,
    template: PathBuf,
    output: PathBuf,
}

pub fn run(root: &Path, doc_type: &str, output: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let doc_type: DocType = doc_type.parse()?;
    let template = paths::template_path(root, doc_type);
    if !template.is_file() {
        anyhow::bail!(
            "template not found: {} (run inside a forge-sdd project, or 'forge-sdd update' to restore it)",
            template.display()
        );
    }

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => default_output(root, doc_type),
    };
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }

    let written = copy_file(&template, &output, &CopyOptions::verbatim())
        .with_context(|| format!("failed to copy the {doc_type} template"))?;

    if json {
        return print_json(&TemplateReport {
            doc_type,
            template,
            output: written,
        });
    }

    println!("Template copied to {}", written.display());
    println!("\nTip: ask GitHub Copilot to fill in the template, then run 'forge-sdd validate'.");
    Ok(())
}

/// `docs/<type>-<YYYY-MM-DD>.md` under `root`, dated today.
fn default_output(root: &Path, doc_type: DocType) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    paths::docs_dir(root).join(format!("{}-{date}.md", doc_type.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_is_dated_under_docs() {
        let out = default_output(Path::new("/p"), DocType::Add);
        let name = out.file_name().unwrap().to_string_lossy().into_owned();
        assert!(out.starts_with("/p/docs"));
        assert!(name.starts_with("ADD-"));
        assert!(name.ends_with(".md"));
        // ADD- + YYYY-MM-DD + .md
        assert_eq!(name.len(), 4 + 10 + 3);
    }
}
