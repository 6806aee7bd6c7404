//! Agent record types
//!
//! An [`AgentRecord`] is the validated, in-memory form of one on-disk agent
//! declaration (config.yaml + optional AGENT.md). Records are built once per
//! load pass and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Agent tier: strategic agents plan and may delegate, tactical agents
/// execute a narrow task and never delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Strategic,
    Tactical,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Strategic => "strategic",
            Tier::Tactical => "tactical",
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strategic" => Ok(Tier::Strategic),
            "tactical" => Ok(Tier::Tactical),
            other => Err(format!(
                "invalid tier '{}' (must be strategic or tactical)",
                other
            )),
        }
    }
}

/// How an agent is surfaced at runtime.
///
/// `on-demand` agents are looked up by the selector; `preload` agents are
/// additionally eligible for ahead-of-time export as skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeMode {
    #[default]
    OnDemand,
    Preload,
}

impl RuntimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::OnDemand => "on-demand",
            RuntimeMode::Preload => "preload",
        }
    }
}

impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-demand" => Ok(RuntimeMode::OnDemand),
            "preload" => Ok(RuntimeMode::Preload),
            other => Err(format!(
                "invalid runtime mode '{}' (must be on-demand or preload)",
                other
            )),
        }
    }
}

/// Declaration maturity marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Stable,
    Draft,
}

impl FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(AgentStatus::Stable),
            "draft" => Ok(AgentStatus::Draft),
            other => Err(format!(
                "invalid status '{}' (must be stable or draft)",
                other
            )),
        }
    }
}

/// Runtime execution preferences (v2 schema `runtime.execution`).
///
/// Carried as data only; the core never branches on these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExecutionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<String>,
}

/// A validated agent declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRecord {
    /// Unique identifier; always equals the source directory name.
    pub name: String,

    /// Human-readable summary.
    pub description: String,

    pub tier: Tier,

    /// Free-form classification string.
    pub category: String,

    /// Trigger keywords, in declaration order.
    pub keywords: Vec<String>,

    /// Advisory flag for agents that want an elevated model. The core never
    /// branches on this.
    pub requires_opus: bool,

    /// Agents this one may hand off to. Informational only; names are not
    /// checked against the catalog.
    pub delegates_to: Vec<String>,

    pub runtime_mode: RuntimeMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<ExecutionConfig>,

    /// Raw AGENT.md body; empty when the declaration has none.
    #[serde(skip_serializing)]
    pub instructions: String,
}

impl AgentRecord {
    /// Number of keywords that occur (case-insensitively) as substrings of
    /// the task text.
    pub fn match_score(&self, task: &str) -> usize {
        let task_lower = task.to_lowercase();
        self.keywords
            .iter()
            .filter(|kw| task_lower.contains(&kw.to_lowercase()))
            .count()
    }

    /// The keywords that matched the task text, in declaration order.
    pub fn matched_keywords(&self, task: &str) -> Vec<&str> {
        let task_lower = task.to_lowercase();
        self.keywords
            .iter()
            .filter(|kw| task_lower.contains(&kw.to_lowercase()))
            .map(|kw| kw.as_str())
            .collect()
    }

    /// Whether this agent matches the task at all.
    pub fn can_handle(&self, task: &str) -> bool {
        self.match_score(task) > 0
    }

    /// Synthesize the execution plan for this agent.
    ///
    /// Strategic agents get the fixed four-phase skeleton plus one delegation
    /// step per `delegates_to` entry, in declared order. Tactical agents have
    /// no plan.
    pub fn plan(&self) -> Vec<PlanStep> {
        if self.tier != Tier::Strategic {
            return Vec::new();
        }

        let mut plan: Vec<PlanStep> = ["Analyze task", "Develop strategy", "Execute plan", "Verify results"]
            .iter()
            .enumerate()
            .map(|(i, action)| PlanStep {
                step: i + 1,
                action: action.to_string(),
                delegate_to: None,
            })
            .collect();

        for (i, delegate) in self.delegates_to.iter().enumerate() {
            plan.push(PlanStep {
                step: i + 5,
                action: format!("Delegate tactical task to {}", delegate),
                delegate_to: Some(delegate.clone()),
            });
        }

        plan
    }

    /// Run the agent against a task context.
    ///
    /// Instruction-based agents do not execute anything themselves; the
    /// report bundles the metadata, matched keywords, and (for strategic
    /// agents) the synthesized plan for the caller to act on.
    pub fn run(&self, context: &AgentContext) -> AgentReport {
        tracing::info!("running agent: {}", self.name);

        let matched: Vec<String> = self
            .matched_keywords(&context.task_description)
            .into_iter()
            .map(String::from)
            .collect();

        let plan = self.plan();

        AgentReport {
            status: "ready".to_string(),
            message: format!("Agent {} ready for task execution", self.name),
            agent: self.name.clone(),
            tier: self.tier,
            category: self.category.clone(),
            matched_keywords: matched,
            severity: context.severity.clone(),
            environment: context.environment.clone(),
            plan: if plan.is_empty() { None } else { Some(plan) },
            delegations: if self.delegates_to.is_empty() {
                None
            } else {
                Some(self.delegates_to.clone())
            },
        }
    }
}

/// One step of a synthesized plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub step: usize,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_to: Option<String>,
}

/// Caller-supplied context for an agent invocation.
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    pub task_description: String,
    pub repository_path: Option<String>,
    pub environment: Option<String>,
    pub severity: Option<String>,
}

impl AgentContext {
    pub fn new(task_description: impl Into<String>) -> Self {
        Self {
            task_description: task_description.into(),
            ..Default::default()
        }
    }
}

/// Structured result of invoking an agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub status: String,
    pub message: String,
    pub agent: String,
    pub tier: Tier,
    pub category: String,
    pub matched_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Vec<PlanStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegations: Option<Vec<String>>,
}

#[cfg(test)]
pub(crate) fn test_record(name: &str, tier: Tier, keywords: &[&str]) -> AgentRecord {
    AgentRecord {
        name: name.to_string(),
        description: format!("{} agent", name),
        tier,
        category: "development".to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        requires_opus: false,
        delegates_to: Vec::new(),
        runtime_mode: RuntimeMode::OnDemand,
        version: None,
        status: None,
        execution: None,
        instructions: String::new(),
    }
}
