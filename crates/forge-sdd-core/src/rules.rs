use regex::Regex;
use std::sync::OnceLock;

/// One rewrite from a toolkit-relative path form to its project-relative form.
pub struct PathRule {
    pub pattern: Regex,
    pub replacement: &'static str,
    pub description: &'static str,
}

/// A leftover form the validator rejects, tied to the rule that should have
/// rewritten it.
pub struct LeftoverCheck {
    pub pattern: &'static str,
    pub rule: &'static str,
}

pub const RULE_NESTED_BASE: &str = "Base prompts (nested): ../../prompts/base/ → _base/";
pub const RULE_BASE: &str = "Base prompts: ../base/ → _base/";
pub const RULE_TEMPLATES: &str = "Templates: ../../templates/ → ../.forge-sdd/templates/";
pub const RULE_SCHEMAS: &str = "Schemas: ../../schemas/ → ../.forge-sdd/schemas/";
pub const RULE_DOCS: &str = "Docs: ../../docs/ → ../docs/";

// ---------------------------------------------------------------------------
// Rule set (evaluation order matters)
// ---------------------------------------------------------------------------
//
// Every pattern consumes the whole run of leading `../` segments, and no
// replacement contains any pattern's trigger, so a second pass finds nothing.
// `docs/` needs at least two segments: a single `../docs/` is the destination
// form.

static RULES: OnceLock<Vec<PathRule>> = OnceLock::new();

pub fn path_rules() -> &'static [PathRule] {
    RULES.get_or_init(|| {
        vec![
            PathRule {
                pattern: Regex::new(r"(?:\.\./)+prompts/base/").unwrap(),
                replacement: "_base/",
                description: RULE_NESTED_BASE,
            },
            PathRule {
                pattern: Regex::new(r"(?:\.\./)+base/").unwrap(),
                replacement: "_base/",
                description: RULE_BASE,
            },
            PathRule {
                pattern: Regex::new(r"(?:\.\./)+templates/").unwrap(),
                replacement: "../.forge-sdd/templates/",
                description: RULE_TEMPLATES,
            },
            PathRule {
                pattern: Regex::new(r"(?:\.\./)+schemas/").unwrap(),
                replacement: "../.forge-sdd/schemas/",
                description: RULE_SCHEMAS,
            },
            PathRule {
                pattern: Regex::new(r"(?:\.\./){2,}docs/").unwrap(),
                replacement: "../docs/",
                description: RULE_DOCS,
            },
        ]
    })
}

/// Substrings that must not survive a transformation. Each one is the
/// shortest text any matching rule pattern can match.
pub const LEFTOVER_CHECKS: &[LeftoverCheck] = &[
    LeftoverCheck {
        pattern: "../prompts/base/",
        rule: RULE_NESTED_BASE,
    },
    LeftoverCheck {
        pattern: "../base/",
        rule: RULE_BASE,
    },
    LeftoverCheck {
        pattern: "../templates/",
        rule: RULE_TEMPLATES,
    },
    LeftoverCheck {
        pattern: "../schemas/",
        rule: RULE_SCHEMAS,
    },
    LeftoverCheck {
        pattern: "../../docs/",
        rule: RULE_DOCS,
    },
];
