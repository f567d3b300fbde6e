use anyhow::Context;
use forge_sdd_core::{io, toolkit::Toolkit, transform, TransformationStats};
use serde::Serialize;
use std::path::Path;

use crate::output::{print_json, print_table};

#[derive(Serialize)]
struct PromptAudit {
    file: String,
    rewrites: usize,
    stats: TransformationStats,
    /// Leftover toolkit-relative reference after rewriting, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// `forge-sdd audit`: count the rewrites each toolkit prompt needs and check
/// that rewriting leaves no toolkit-relative reference behind.
pub fn run(toolkit_dir: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let toolkit = Toolkit::locate(toolkit_dir).context("failed to load toolkit")?;

    let mut audits = Vec::new();
    for path in toolkit.prompt_files()? {
        let text = io::read_text(&path)?;
        let stats = transform::stats(&text);
        let error = transform::validate(&transform::transform(&text))
            .err()
            .map(|e| e.to_string());
        audits.push(PromptAudit {
            file: toolkit.relative(&path),
            rewrites: stats.total(),
            stats,
            error,
        });
    }

    let failed = audits.iter().filter(|a| a.error.is_some()).count();

    if json {
        print_json(&audits)?;
    } else {
        let rows: Vec<Vec<String>> = audits
            .iter()
            .flat_map(|a| {
                let status = if a.error.is_some() { "FAIL" } else { "ok" };
                let mut rows = vec![vec![
                    a.file.clone(),
                    "(total)".to_string(),
                    a.rewrites.to_string(),
                    status.to_string(),
                ]];
                rows.extend(a.stats.iter().filter(|c| c.count > 0).map(|c| {
                    vec![String::new(), c.rule.to_string(), c.count.to_string(), String::new()]
                }));
                rows
            })
            .collect();
        print_table(&["FILE", "RULE", "COUNT", "STATUS"], &rows);

        for audit in &audits {
            if let Some(error) = &audit.error {
                eprintln!("{}: {error}", audit.file);
            }
        }

        let total: usize = audits.iter().map(|a| a.rewrites).sum();
        println!(
            "\n{} prompt(s), {total} path rewrite(s), {failed} failure(s)",
            audits.len()
        );
    }

    if failed > 0 {
        anyhow::bail!("{failed} prompt(s) keep toolkit-relative paths after rewriting");
    }
    Ok(())
}
