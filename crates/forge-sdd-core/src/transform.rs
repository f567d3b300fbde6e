//! Toolkit-to-project path rewriting.
//!
//! Prompts are authored inside the toolkit tree (`prompts/commands/*.md`,
//! `prompts/base/*.md`) and link to templates, schemas, and docs with paths
//! relative to that tree. Once copied into a project those links must point
//! at `.github/prompts/_base/` and `.forge-sdd/`. The rewrite is plain text
//! substitution: code fences and inline code are rewritten like prose.

use crate::error::{ForgeError, Result};
use crate::rules::{path_rules, LEFTOVER_CHECKS};
use regex::NoExpand;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;

/// Rewrite every toolkit-relative path in `text` to its project-relative form.
///
/// Applies each rule once, in order, over the whole text. Idempotent: running
/// it on its own output returns the same string.
pub fn transform(text: &str) -> String {
    let mut out = text.to_owned();
    for rule in path_rules() {
        let replaced = match rule.pattern.replace_all(&out, NoExpand(rule.replacement)) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(s) => s,
        };
        out = replaced;
    }
    out
}

/// Fail if any toolkit-relative reference survived [`transform`].
///
/// Meant to run right after `transform` on the same text. A failure here
/// means the rule set is incomplete.
pub fn validate(text: &str) -> Result<()> {
    for check in LEFTOVER_CHECKS {
        if let Some(pos) = text.find(check.pattern) {
            return Err(ForgeError::UntransformedPath {
                pattern: check.pattern,
                rule: check.rule,
                line: line_of(text, pos),
            });
        }
    }
    Ok(())
}

fn line_of(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].matches('\n').count() + 1
}

// ---------------------------------------------------------------------------
// TransformationStats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCount {
    pub rule: &'static str,
    pub count: usize,
}

/// Per-rule match counts, one entry per rule in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationStats {
    counts: Vec<RuleCount>,
}

impl TransformationStats {
    pub fn get(&self, rule: &str) -> Option<usize> {
        self.counts.iter().find(|c| c.rule == rule).map(|c| c.count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleCount> {
        self.counts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Serialize for TransformationStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for c in &self.counts {
            map.serialize_entry(c.rule, &c.count)?;
        }
        map.end()
    }
}

/// Count how many occurrences each rule would rewrite in `text`.
///
/// Computed on the original, untransformed text.
pub fn stats(text: &str) -> TransformationStats {
    let counts = path_rules()
        .iter()
        .map(|rule| RuleCount {
            rule: rule.description,
            count: rule.pattern.find_iter(text).count(),
        })
        .collect();
    TransformationStats { counts }
}

// ---------------------------------------------------------------------------
// Provenance header
// ---------------------------------------------------------------------------

/// Prepend a banner recording where `text` was generated from. Not
/// idempotent; call once per copy.
pub fn add_header(text: &str, origin: &str) -> String {
    format!(
        "<!--\n  Generated by forge-sdd from: {origin}\n  Managed file: `forge-sdd update` overwrites local edits.\n-->\n\n{text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RULE_BASE, RULE_DOCS, RULE_NESTED_BASE, RULE_SCHEMAS, RULE_TEMPLATES};

    const SAMPLES: &[&str] = &[
        "",
        "plain text without any paths",
        "See [system-prompt](../base/system-prompt.md)",
        "Context: [system](../../prompts/base/system-prompt.md)",
        "Template: [ADD](../../templates/general/ADD-template.md)",
        "Schema: [spec](../../schemas/specification-schema.json)",
        "Doc: [guide](../../docs/guide.md)",
        "Legacy: [ADD](../templates/ADD.md) and [s](../schemas/spec.json)",
        "Deep: ../../../docs/a.md ../../../../templates/b.md ../../../prompts/base/c.md",
        "Odd: .../../docs/x x../base/y ../../docs/../../docs/z",
        "Already: _base/a.md ../.forge-sdd/templates/b.md ../docs/c.md",
        "```bash\ncat ../../templates/ADD-template.md\n```\nInline: `../../schemas/spec.json`\n",
        "unicode → ../base/ünïcode.md ✓",
    ];

    // -- transform ----------------------------------------------------------

    #[test]
    fn rewrites_base_prompt_reference() {
        assert_eq!(
            transform("See [system-prompt](../base/system-prompt.md)"),
            "See [system-prompt](_base/system-prompt.md)"
        );
    }

    #[test]
    fn rewrites_nested_base_prompt_reference() {
        assert_eq!(
            transform("Context: [system](../../prompts/base/system-prompt.md)"),
            "Context: [system](_base/system-prompt.md)"
        );
    }

    #[test]
    fn rewrites_template_reference() {
        assert_eq!(
            transform("Template: [ADD](../../templates/general/ADD-template.md)"),
            "Template: [ADD](../.forge-sdd/templates/general/ADD-template.md)"
        );
    }

    #[test]
    fn rewrites_schema_reference() {
        assert_eq!(
            transform("Schema: [spec](../../schemas/specification-schema.json)"),
            "Schema: [spec](../.forge-sdd/schemas/specification-schema.json)"
        );
    }

    #[test]
    fn rewrites_docs_reference() {
        assert_eq!(
            transform("Doc: [guide](../../docs/guide.md)"),
            "Doc: [guide](../docs/guide.md)"
        );
    }

    #[test]
    fn normalizes_single_parent_forms() {
        assert_eq!(
            transform("[t](../templates/ADD.md) [s](../schemas/spec.json)"),
            "[t](../.forge-sdd/templates/ADD.md) [s](../.forge-sdd/schemas/spec.json)"
        );
    }

    #[test]
    fn leaves_single_parent_docs_alone() {
        let input = "See ../docs/guide.md";
        assert_eq!(transform(input), input);
    }

    #[test]
    fn rewrites_code_blocks_and_inline_code() {
        let input = "See [p](../base/system-prompt.md).\n\n```bash\ncat ../../templates/ADD-template.md\n```\n\nInline: `../../schemas/spec.json`\n";
        let out = transform(input);
        assert!(out.contains("[p](_base/system-prompt.md)"));
        assert!(out.contains("cat ../.forge-sdd/templates/ADD-template.md"));
        assert!(out.contains("`../.forge-sdd/schemas/spec.json`"));
    }

    #[test]
    fn handles_several_categories_in_one_file() {
        let input = "\nBase: [system](../base/system-prompt.md)\nTemplate: [ADD](../../templates/general/ADD-template.md)\nSchema: [spec](../../schemas/spec-schema.json)\nDocs: [readme](../../docs/README.md)\n";
        let out = transform(input);
        assert!(out.contains("_base/system-prompt.md"));
        assert!(out.contains("../.forge-sdd/templates/general/ADD-template.md"));
        assert!(out.contains("../.forge-sdd/schemas/spec-schema.json"));
        assert!(out.contains("(../docs/README.md)"));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(transform(""), "");
    }

    #[test]
    fn clean_input_is_unchanged() {
        let input = "This is just regular markdown text without any paths.";
        assert_eq!(transform(input), input);
        let already = "Already transformed: [system](_base/system-prompt.md)";
        assert_eq!(transform(already), already);
    }

    #[test]
    fn transform_is_idempotent() {
        for sample in SAMPLES {
            let once = transform(sample);
            assert_eq!(transform(&once), once, "not idempotent for: {sample:?}");
        }
    }

    #[test]
    fn transformed_output_always_validates() {
        for sample in SAMPLES {
            let out = transform(sample);
            validate(&out).unwrap_or_else(|e| panic!("{sample:?} -> {out:?}: {e}"));
        }
    }

    // -- validate -----------------------------------------------------------

    #[test]
    fn validate_accepts_transformed_content() {
        let content = "\n[System](_base/system-prompt.md)\n[Template](../.forge-sdd/templates/ADD-template.md)\n[Schema](../.forge-sdd/schemas/spec-schema.json)\n[Docs](../docs/guide.md)\n";
        validate(content).unwrap();
    }

    #[test]
    fn validate_rejects_leftover_base() {
        let err = validate("Still has: [system](../base/system-prompt.md)").unwrap_err();
        assert!(err.to_string().contains("Invalid path reference '../base/'"));
        assert!(err.to_string().ends_with("please report it"));
    }

    #[test]
    fn validate_rejects_single_parent_templates() {
        let err = validate("Still has: [template](../templates/ADD.md)").unwrap_err();
        assert!(matches!(
            err,
            ForgeError::UntransformedPath {
                pattern: "../templates/",
                rule: RULE_TEMPLATES,
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_leftover_schemas_and_prompts() {
        assert!(validate("Still has: [schema](../schemas/spec.json)").is_err());
        assert!(validate("Still has: [prompt](../../prompts/base/system.md)").is_err());
        assert!(validate("Still has: [doc](../../docs/guide.md)").is_err());
    }

    #[test]
    fn validate_reports_line_of_first_leftover() {
        let err = validate("line one\nline two\n[t](../../templates/x.md)\n").unwrap_err();
        match err {
            ForgeError::UntransformedPath { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_message_asks_for_a_report() {
        let err = validate("../schemas/x.json").unwrap_err();
        assert!(err.to_string().contains("please report it"));
    }

    // -- stats --------------------------------------------------------------

    #[test]
    fn stats_counts_base_prompts() {
        let s = stats("\n[One](../base/file1.md)\n[Two](../base/file2.md)\n");
        assert_eq!(s.get(RULE_BASE), Some(2));
        assert_eq!(s.total(), 2);
    }

    #[test]
    fn stats_counts_templates() {
        let s = stats("[T1](../../templates/a.md)\n[T2](../../templates/b.md)\n[T3](../../templates/c.md)");
        assert_eq!(s.get(RULE_TEMPLATES), Some(3));
    }

    #[test]
    fn stats_lists_every_rule_at_zero() {
        let s = stats("No paths here!");
        assert_eq!(s.iter().count(), path_rules().len());
        assert!(s.iter().all(|c| c.count == 0));
        assert!(s.is_empty());
        for rule in [RULE_NESTED_BASE, RULE_BASE, RULE_TEMPLATES, RULE_SCHEMAS, RULE_DOCS] {
            assert_eq!(s.get(rule), Some(0));
        }
    }

    #[test]
    fn stats_counts_mixed_categories() {
        let s = stats("[Base](../base/system.md)\n[N](../../prompts/base/x.md)\n[Template](../../templates/ADD.md)\n[Schema](../../schemas/spec.json)\n[D](../../docs/d.md)");
        assert_eq!(s.get(RULE_BASE), Some(1));
        assert_eq!(s.get(RULE_NESTED_BASE), Some(1));
        assert_eq!(s.get(RULE_TEMPLATES), Some(1));
        assert_eq!(s.get(RULE_SCHEMAS), Some(1));
        assert_eq!(s.get(RULE_DOCS), Some(1));
    }

    #[test]
    fn stats_match_what_transform_rewrites() {
        for sample in SAMPLES {
            let out = transform(sample);
            assert_eq!(stats(sample).total() > 0, out != *sample, "{sample:?}");
            assert_eq!(stats(&out).total(), 0, "matches left in output of {sample:?}");
        }
    }

    #[test]
    fn stats_serialize_as_rule_keyed_map() {
        let json = serde_json::to_value(stats("../base/a.md")).unwrap();
        assert_eq!(json[RULE_BASE], 1);
        assert_eq!(json[RULE_DOCS], 0);
    }

    // -- header -------------------------------------------------------------

    #[test]
    fn header_names_origin_and_keeps_body() {
        let body = "# Title\n\nBody\n";
        let out = add_header(body, "prompts/commands/forge-ideate.md");
        assert!(out.starts_with("<!--\n"));
        assert!(out.contains("Generated by forge-sdd from: prompts/commands/forge-ideate.md"));
        assert!(out.ends_with(body));
    }
}
