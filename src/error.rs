//! Error types for catalog loading and declaration validation

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure of a whole catalog load.
///
/// Per-declaration problems are never fatal; they are collected as
/// [`LoadIssue`]s alongside the partially-built catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The agents root itself could not be read. No catalog is produced.
    #[error("agents directory unreadable: {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A problem with one agent declaration, recorded during a load pass.
///
/// The declaration is skipped; sibling declarations keep loading.
#[derive(Debug)]
pub struct LoadIssue {
    /// Directory name of the offending declaration.
    pub agent: String,
    pub kind: LoadIssueKind,
}

impl std::fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.agent, self.kind)
    }
}

#[derive(Debug, Error)]
pub enum LoadIssueKind {
    /// No config.yaml in the declaration directory.
    #[error("missing config.yaml")]
    MissingConfig,

    /// config.yaml exists but could not be read.
    #[error("unreadable config.yaml: {0}")]
    ConfigUnreadable(#[source] std::io::Error),

    /// config.yaml is not valid YAML.
    #[error("invalid YAML in config.yaml: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// config.yaml parsed but failed schema validation.
    #[error(transparent)]
    InvalidSchema(#[from] ValidationError),
}

/// Schema validation failure for one declaration.
///
/// Carries every problem found, not just the first, so a bad declaration
/// can be fixed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid agent config: {}", .problems.join("; "))]
pub struct ValidationError {
    pub problems: Vec<String>,
}

/// Non-fatal lint finding for a declaration that still loads.
///
/// Currently raised for recognized-but-deprecated schema shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaWarning {
    /// Directory name of the declaration.
    pub agent: String,
    pub message: String,
}

impl std::fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.agent, self.message)
    }
}
