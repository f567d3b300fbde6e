//! SDD document checks: YAML frontmatter validated against the project's
//! JSON Schemas. Schemas are consumed as-is.

use crate::error::{ForgeError, Result};
use crate::io;
use crate::paths;
use crate::types::DocType;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;

static FRONTMATTER_RE: OnceLock<Regex> = OnceLock::new();

fn frontmatter_re() -> &'static Regex {
    FRONTMATTER_RE.get_or_init(|| Regex::new(r"\A---\r?\n([\s\S]*?)\r?\n---").unwrap())
}

/// Raw YAML between the leading `---` fences, if the document has any.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    frontmatter_re()
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Parse the frontmatter into JSON so it can be checked against a schema.
pub fn parse_frontmatter(content: &str) -> Result<Option<Value>> {
    let Some(raw) = extract_frontmatter(content) else {
        return Ok(None);
    };
    let yaml: serde_yaml::Value = serde_yaml::from_str(raw)?;
    if yaml.is_null() {
        return Ok(Some(Value::Object(Default::default())));
    }
    Ok(Some(serde_json::to_value(yaml)?))
}

/// The document type named by the frontmatter `type:` field.
pub fn detect_doc_type(frontmatter: &Value) -> Option<Result<DocType>> {
    frontmatter
        .get("type")
        .and_then(Value::as_str)
        .map(str::parse)
}

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON pointer into the frontmatter, empty for the root.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Check `instance` against `schema`, collecting every violation.
pub fn check_against_schema(name: &str, schema: &Value, instance: &Value) -> Result<Vec<Violation>> {
    let validator = jsonschema::validator_for(schema).map_err(|e| ForgeError::InvalidSchema {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    let violations = validator
        .iter_errors(instance)
        .map(|e| Violation {
            path: e.instance_path().to_string(),
            message: e.to_string(),
        })
        .collect();
    Ok(violations)
}

pub fn load_schema(root: &Path, doc_type: DocType) -> Result<Value> {
    let path = paths::schema_path(root, doc_type);
    if !path.exists() {
        return Err(ForgeError::SchemaNotFound(path));
    }
    let text = io::read_text(&path)?;
    Ok(serde_json::from_str(&text)?)
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub doc_type: DocType,
    /// False when the document has no frontmatter and nothing was checked.
    pub checked: bool,
    pub violations: Vec<Violation>,
}

impl DocumentReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate the document at `file` against the schema installed in the
/// project at `root`. `doc_type` overrides the frontmatter `type:` field.
pub fn validate_document(root: &Path, file: &Path, doc_type: Option<DocType>) -> Result<DocumentReport> {
    let content = io::read_text(file)?;
    let frontmatter = parse_frontmatter(&content)?;

    let doc_type = match doc_type {
        Some(t) => t,
        None => match frontmatter.as_ref().and_then(detect_doc_type) {
            Some(parsed) => parsed?,
            None => return Err(ForgeError::UnknownDocType),
        },
    };

    let schema = load_schema(root, doc_type)?;

    let Some(frontmatter) = frontmatter else {
        tracing::warn!(file = %file.display(), "no frontmatter found, skipping validation");
        return Ok(DocumentReport {
            doc_type,
            checked: false,
            violations: Vec::new(),
        });
    };

    let violations = check_against_schema(doc_type.as_str(), &schema, &frontmatter)?;
    Ok(DocumentReport {
        doc_type,
        checked: true,
        violations,
    })
}
