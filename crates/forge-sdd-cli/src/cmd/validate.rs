use anyhow::Context;
use forge_sdd_core::{document, types::DocType};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::output::print_json;

#[derive(Serialize)]
struct ValidateReport {
    file: PathBuf,
    doc_type: DocType,
    valid: bool,
    checked: bool,
    errors: Vec<String>,
}

pub fn run(root: &Path, file: &Path, doc_type: Option<&str>, json: bool) -> anyhow::Result<()> {
    let doc_type: Option<DocType> = doc_type.map(str::parse).transpose()?;
    let report = document::validate_document(root, file, doc_type)
        .with_context(|| format!("failed to validate {}", file.display()))?;

    let errors: Vec<String> = report.violations.iter().map(ToString::to_string).collect();

    if json {
        print_json(&ValidateReport {
            file: file.to_path_buf(),
            doc_type: report.doc_type,
            valid: report.is_valid(),
            checked: report.checked,
            errors,
        })?;
    } else if !report.checked {
        println!(
            "No frontmatter in {}; nothing to check against the {} schema.",
            file.display(),
            report.doc_type
        );
    } else if report.is_valid() {
        println!("{} is a valid {} document.", file.display(), report.doc_type);
    } else {
        println!("{} has schema errors:\n", file.display());
        for error in &errors {
            println!("  - {error}");
        }
        println!();
    }

    if !report.is_valid() {
        anyhow::bail!(
            "{} failed {} schema validation ({} error(s))",
            file.display(),
            report.doc_type,
            report.violations.len()
        );
    }
    Ok(())
}
