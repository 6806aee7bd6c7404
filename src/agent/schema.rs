//! On-disk declaration schema and validation
//!
//! `config.yaml` is first deserialized into a permissive raw shape, then
//! validated into an [`AgentRecord`]. Validation collects every problem for
//! the declaration instead of stopping at the first, and a separate lint
//! pass flags recognized-but-deprecated schema shapes as warnings.

use crate::agent::record::{AgentRecord, ExecutionConfig, RuntimeMode, Tier};
use crate::error::ValidationError;
use serde::Deserialize;

/// Permissive deserialization target for config.yaml.
///
/// All fields are optional here; requiredness is enforced by [`validate`]
/// so that one pass can report every missing field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAgentConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    pub tier: Option<String>,
    pub category: Option<String>,

    #[serde(default)]
    pub requires_opus: bool,

    #[serde(default)]
    pub delegates_to: Vec<String>,

    #[serde(default)]
    pub triggers: RawTriggers,

    #[serde(default)]
    pub runtime: RawRuntime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTriggers {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRuntime {
    pub mode: Option<String>,

    /// Legacy v1 shape; superseded by `execution.preferred`.
    pub preferred: Option<String>,

    /// Legacy v1 shape; superseded by `execution.fallbacks`.
    pub fallback: Option<String>,

    pub execution: Option<RawExecution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExecution {
    pub preferred: Option<String>,

    #[serde(default)]
    pub fallbacks: Vec<String>,
}

/// A validated declaration together with any lint warnings it produced.
#[derive(Debug, Clone)]
pub struct Validated {
    pub record: AgentRecord,
    pub warnings: Vec<String>,
}

/// Validate a raw config against the schema, producing an [`AgentRecord`].
///
/// `dir_name` is the declaration directory's name; the config's `name` must
/// match it. `instructions` is the AGENT.md body (empty when absent).
pub fn validate(
    raw: RawAgentConfig,
    dir_name: &str,
    instructions: String,
) -> Result<Validated, ValidationError> {
    let mut problems = Vec::new();

    let name = match raw.name {
        Some(name) => {
            if name != dir_name {
                problems.push(format!(
                    "name '{}' does not match directory '{}'",
                    name, dir_name
                ));
            }
            name
        }
        None => {
            problems.push("missing required field 'name'".to_string());
            String::new()
        }
    };

    let description = match raw.description {
        Some(description) => description,
        None => {
            problems.push("missing required field 'description'".to_string());
            String::new()
        }
    };

    let tier = match raw.tier {
        Some(tier) => match tier.parse::<Tier>() {
            Ok(tier) => Some(tier),
            Err(e) => {
                problems.push(e);
                None
            }
        },
        None => {
            problems.push("missing required field 'tier'".to_string());
            None
        }
    };

    if raw.triggers.keywords.is_empty() {
        problems.push("no keywords defined in triggers".to_string());
    }

    let runtime_mode = match raw.runtime.mode.as_deref() {
        Some(mode) => match mode.parse::<RuntimeMode>() {
            Ok(mode) => mode,
            Err(e) => {
                problems.push(e);
                RuntimeMode::default()
            }
        },
        None => RuntimeMode::default(),
    };

    let status = match raw.status.as_deref() {
        Some(status) => match status.parse() {
            Ok(status) => Some(status),
            Err(e) => {
                problems.push(e);
                None
            }
        },
        None => None,
    };

    if !problems.is_empty() {
        return Err(ValidationError { problems });
    }
    let Some(tier) = tier else {
        // A missing or invalid tier always records a problem above.
        return Err(ValidationError { problems });
    };

    let mut warnings = Vec::new();
    if raw.runtime.preferred.is_some() && raw.runtime.execution.is_none() {
        warnings.push(
            "legacy schema: runtime.preferred should move to runtime.execution.preferred"
                .to_string(),
        );
    }
    if raw.runtime.fallback.is_some() && raw.runtime.execution.is_none() {
        warnings.push(
            "legacy schema: runtime.fallback should move to runtime.execution.fallbacks"
                .to_string(),
        );
    }

    // Old-shape declarations still load; the flat keys are folded into the
    // canonical execution config.
    let execution = match raw.runtime.execution {
        Some(execution) => Some(ExecutionConfig {
            preferred: execution.preferred,
            fallbacks: execution.fallbacks,
        }),
        None if raw.runtime.preferred.is_some() || raw.runtime.fallback.is_some() => {
            Some(ExecutionConfig {
                preferred: raw.runtime.preferred,
                fallbacks: raw.runtime.fallback.into_iter().collect(),
            })
        }
        None => None,
    };

    let record = AgentRecord {
        name,
        description,
        tier,
        category: raw.category.unwrap_or_else(|| "development".to_string()),
        keywords: raw.triggers.keywords,
        requires_opus: raw.requires_opus,
        delegates_to: raw.delegates_to,
        runtime_mode,
        version: raw.version,
        status,
        execution,
        instructions,
    };

    Ok(Validated { record, warnings })
}
