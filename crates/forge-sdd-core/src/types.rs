use crate::error::ForgeError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One step of the six-stage SDD lifecycle. Each stage ships as a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Ideate,
    Architect,
    Plan,
    Implement,
    Test,
    Operate,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Ideate,
            Stage::Architect,
            Stage::Plan,
            Stage::Implement,
            Stage::Test,
            Stage::Operate,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Ideate => "ideate",
            Stage::Architect => "architect",
            Stage::Plan => "plan",
            Stage::Implement => "implement",
            Stage::Test => "test",
            Stage::Operate => "operate",
        }
    }

    /// File name of the stage prompt inside the toolkit, e.g. `forge-ideate.md`.
    pub fn prompt_filename(self) -> String {
        format!("forge-{}.md", self.as_str())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ideate" => Ok(Stage::Ideate),
            "architect" => Ok(Stage::Architect),
            "plan" => Ok(Stage::Plan),
            "implement" => Ok(Stage::Implement),
            "test" => Ok(Stage::Test),
            "operate" => Ok(Stage::Operate),
            _ => Err(ForgeError::InvalidStage(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DocType
// ---------------------------------------------------------------------------

/// An SDD document kind. Each has a template and a schema of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    #[serde(rename = "specification")]
    Specification,
    #[serde(rename = "ADD")]
    Add,
    #[serde(rename = "implementation-plan")]
    ImplementationPlan,
    #[serde(rename = "test-plan")]
    TestPlan,
}

impl DocType {
    pub fn all() -> &'static [DocType] {
        &[
            DocType::Specification,
            DocType::Add,
            DocType::ImplementationPlan,
            DocType::TestPlan,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Specification => "specification",
            DocType::Add => "ADD",
            DocType::ImplementationPlan => "implementation-plan",
            DocType::TestPlan => "test-plan",
        }
    }

    pub fn template_filename(self) -> String {
        format!("{}-template.md", self.as_str())
    }

    pub fn schema_filename(self) -> String {
        format!("{}.schema.json", self.as_str())
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "specification" => Ok(DocType::Specification),
            "ADD" => Ok(DocType::Add),
            "implementation-plan" => Ok(DocType::ImplementationPlan),
            "test-plan" => Ok(DocType::TestPlan),
            _ => Err(ForgeError::InvalidDocType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectTemplate
// ---------------------------------------------------------------------------

/// Which Forge product a project targets. Recorded in the project config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectTemplate {
    #[default]
    Basic,
    Jira,
    Confluence,
}

impl ProjectTemplate {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectTemplate::Basic => "basic",
            ProjectTemplate::Jira => "jira",
            ProjectTemplate::Confluence => "confluence",
        }
    }
}

impl fmt::Display for ProjectTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectTemplate {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(ProjectTemplate::Basic),
            "jira" => Ok(ProjectTemplate::Jira),
            "confluence" => Ok(ProjectTemplate::Confluence),
            _ => Err(ForgeError::InvalidTemplate(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
