//! Agent registry core
//!
//! The loading and selection engine:
//! - `AgentRecord`: validated in-memory form of one declaration
//! - `load_catalog`: directory walk producing a `Catalog` plus per-entry issues
//! - `select`: keyword-scoring selection with explicit-name override
//! - `Catalog` / `SharedCatalog`: read-only queries and atomic-swap reload

mod catalog;
mod loader;
mod record;
mod schema;
mod selector;

pub use catalog::{Catalog, SharedCatalog};
pub use loader::{load_catalog, load_declaration, LoadOutcome, CONFIG_FILE, INSTRUCTIONS_FILE};
pub use record::{
    AgentContext, AgentRecord, AgentReport, AgentStatus, ExecutionConfig, PlanStep, RuntimeMode,
    Tier,
};
pub use schema::{validate, RawAgentConfig, Validated};
pub use selector::select;

#[cfg(test)]
pub(crate) use record::test_record;
