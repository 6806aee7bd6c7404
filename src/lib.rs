//! Magpie - a declarative agent registry
//!
//! This crate provides:
//! - A catalog loader for directory-tree agent declarations (config.yaml + AGENT.md)
//! - Keyword-scoring selection of the best agent for a task description
//! - Read-only catalog queries for adapters (protocol servers, exporters)
//! - A skill exporter and a legacy-format migrator as offline adapters

pub mod error;
pub mod export;
pub mod migrate;

// Registry core
pub mod agent;

pub use agent::{
    load_catalog, select, AgentContext, AgentRecord, AgentReport, Catalog, LoadOutcome, PlanStep,
    RuntimeMode, SharedCatalog, Tier,
};
pub use error::{LoadError, LoadIssue, LoadIssueKind, SchemaWarning, ValidationError};
