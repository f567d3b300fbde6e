use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("not initialized: run 'forge-sdd init' first")]
    NotInitialized,

    #[error("invalid project name '{0}': must be lowercase letters, numbers, and hyphens only")]
    InvalidProjectName(String),

    #[error("directory already exists: {}", .0.display())]
    ProjectExists(PathBuf),

    #[error("invalid stage '{0}': valid stages are ideate, architect, plan, implement, test, operate")]
    InvalidStage(String),

    #[error("invalid document type '{0}': valid types are specification, ADD, implementation-plan, test-plan")]
    InvalidDocType(String),

    #[error("invalid project template '{0}': valid templates are basic, jira, confluence")]
    InvalidTemplate(String),

    #[error("toolkit not found at {}: expected a prompts/ directory", .0.display())]
    ToolkitNotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A toolkit-relative reference survived path rewriting. This is a defect
    /// in the rule set, never a user input problem.
    #[error(
        "Invalid path reference '{pattern}' remains after transformation (line {line}, rule '{rule}'); \
         this is a bug in the forge-sdd path rules, please report it"
    )]
    UntransformedPath {
        pattern: &'static str,
        rule: &'static str,
        line: usize,
    },

    #[error("schema not found: {}", .0.display())]
    SchemaNotFound(PathBuf),

    #[error("invalid schema {name}: {message}")]
    InvalidSchema { name: String, message: String },

    #[error("could not determine document type: pass --type or add `type:` to the frontmatter")]
    UnknownDocType,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
