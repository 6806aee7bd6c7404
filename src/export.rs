//! Skill exporter
//!
//! Converts `preload`-mode agents into standalone skill artifacts: one
//! directory per agent containing a `SKILL.md` with YAML frontmatter followed
//! by the agent's instructions. On-demand agents are skipped; they are meant
//! to be looked up by the selector instead.
//!
//! This is an offline adapter over the read-only catalog; all filesystem
//! writes happen here, never in the registry core.

use crate::agent::{AgentRecord, Catalog, RuntimeMode};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Name of the generated artifact inside each skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

#[derive(Serialize)]
struct SkillFrontmatter<'a> {
    name: &'a str,
    description: &'a str,
    keywords: &'a [String],
    activation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'static str>,
}

/// What an export pass produced.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Agents exported, in catalog order.
    pub generated: Vec<String>,
    /// On-demand agents left alone.
    pub skipped: Vec<String>,
}

/// Render the SKILL.md content for one agent.
pub fn render_skill(record: &AgentRecord) -> Result<String> {
    let frontmatter = SkillFrontmatter {
        name: &record.name,
        description: &record.description,
        keywords: &record.keywords,
        activation: "keywords",
        model: record.requires_opus.then_some("opus"),
    };

    let yaml = serde_yaml::to_string(&frontmatter)
        .with_context(|| format!("failed to serialize frontmatter for {}", record.name))?;

    Ok(format!("---\n{}---\n\n{}", yaml, record.instructions))
}

/// Export every preload agent in the catalog to `out_dir`.
///
/// The output directory is rebuilt from scratch so removed agents do not
/// leave stale skills behind.
pub fn export_skills(catalog: &Catalog, out_dir: &Path) -> Result<ExportReport> {
    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir)
            .with_context(|| format!("failed to clean {}", out_dir.display()))?;
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut report = ExportReport::default();

    for record in catalog.iter() {
        if record.runtime_mode != RuntimeMode::Preload {
            debug!("skipping {}: on-demand mode", record.name);
            report.skipped.push(record.name.clone());
            continue;
        }

        let skill_dir = out_dir.join(&record.name);
        std::fs::create_dir_all(&skill_dir)
            .with_context(|| format!("failed to create {}", skill_dir.display()))?;

        let content = render_skill(record)?;
        std::fs::write(skill_dir.join(SKILL_FILE), content)
            .with_context(|| format!("failed to write skill for {}", record.name))?;

        debug!("generated skill: {}", record.name);
        report.generated.push(record.name.clone());
    }

    info!(
        "generated {} skills, skipped {} on-demand agents",
        report.generated.len(),
        report.skipped.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{test_record, Tier};
    use tempfile::TempDir;

    fn preload_record(name: &str) -> AgentRecord {
        let mut record = test_record(name, Tier::Tactical, &["commit", "git"]);
        record.runtime_mode = RuntimeMode::Preload;
        record.instructions = "# Skill body\n\nDo the thing.".to_string();
        record
    }

    #[test]
    fn test_render_skill_frontmatter_and_body() {
        let content = render_skill(&preload_record("commit-writer")).unwrap();
        assert!(content.starts_with("---\n"));
        assert!(content.contains("name: commit-writer"));
        assert!(content.contains("activation: keywords"));
        assert!(content.contains("- commit"));
        assert!(content.ends_with("# Skill body\n\nDo the thing."));
        // Only elevated-model agents get a model hint
        assert!(!content.contains("model:"));
    }

    #[test]
    fn test_render_skill_model_hint() {
        let mut record = preload_record("deep-thinker");
        record.requires_opus = true;
        let content = render_skill(&record).unwrap();
        assert!(content.contains("model: opus"));
    }

    #[test]
    fn test_export_skips_on_demand() {
        let mut on_demand = test_record("lookup-only", Tier::Strategic, &["plan"]);
        on_demand.runtime_mode = RuntimeMode::OnDemand;
        let catalog = Catalog::from_iter([preload_record("commit-writer"), on_demand]);

        let temp = TempDir::new().unwrap();
        let out = temp.path().join("skills");
        let report = export_skills(&catalog, &out).unwrap();

        assert_eq!(report.generated, vec!["commit-writer"]);
        assert_eq!(report.skipped, vec!["lookup-only"]);
        assert!(out.join("commit-writer").join(SKILL_FILE).exists());
        assert!(!out.join("lookup-only").exists());
    }

    #[test]
    fn test_export_rebuilds_output_dir() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("skills");
        std::fs::create_dir_all(out.join("stale-skill")).unwrap();

        let catalog = Catalog::from_iter([preload_record("fresh")]);
        export_skills(&catalog, &out).unwrap();

        assert!(!out.join("stale-skill").exists());
        assert!(out.join("fresh").join(SKILL_FILE).exists());
    }
}
