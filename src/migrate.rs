//! Legacy skill migration
//!
//! One-way, offline transform of the old standalone-skill layout (one
//! directory per skill holding a markdown file with YAML frontmatter) into
//! agent declarations the catalog loader understands. The registry core
//! never calls this; it only expects the output to be well-formed.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Skills known to be fully developed; everything else migrates as draft.
const STABLE_SKILLS: &[&str] = &[
    "commit-writer",
    "deduplication-engine",
    "tech-debt-scanner",
    "writing-style-analyzer",
];

#[derive(Serialize)]
struct DeclarationDoc<'a> {
    name: &'a str,
    description: String,
    version: &'static str,
    status: &'static str,
    tier: &'static str,
    category: &'static str,
    requires_opus: bool,
    triggers: TriggersDoc,
    runtime: RuntimeDoc,
}

#[derive(Serialize)]
struct TriggersDoc {
    keywords: Vec<String>,
}

#[derive(Serialize)]
struct RuntimeDoc {
    mode: &'static str,
}

/// What a migration pass did.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub migrated: Vec<String>,
    /// Directories without a markdown skill file.
    pub skipped: Vec<String>,
}

/// Split YAML frontmatter from a markdown document.
///
/// Returns the frontmatter mapping (empty when there is none) and the body
/// with frontmatter removed.
fn parse_frontmatter(content: &str) -> Result<(serde_yaml::Mapping, String)> {
    let content = content.trim();

    let Some(rest) = content.strip_prefix("---") else {
        return Ok((serde_yaml::Mapping::new(), content.to_string()));
    };

    let end = rest
        .find("---")
        .context("unclosed frontmatter")?;
    let yaml_content = rest[..end].trim();
    let body = rest[end + 3..].trim().to_string();

    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml_content).context("invalid YAML frontmatter")?;
    let mapping = value.as_mapping().cloned().unwrap_or_default();

    Ok((mapping, body))
}

/// Keyword list from frontmatter; a bare string becomes a one-element list.
fn frontmatter_keywords(frontmatter: &serde_yaml::Mapping) -> Vec<String> {
    match frontmatter.get("keywords") {
        Some(serde_yaml::Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Some(serde_yaml::Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Name-based category heuristic for migrated skills.
fn categorize(name: &str) -> &'static str {
    const CATEGORIES: &[(&str, &[&str])] = &[
        ("git", &["commit", "branch", "merge", "pr-", "changelog"]),
        ("security", &["secret", "vulnerability", "opsec"]),
        ("code-quality", &["lint", "style", "deduplic", "tech-debt"]),
        ("testing", &["test"]),
        ("documentation", &["doc", "api-doc", "writing-style"]),
        ("infrastructure", &["docker", "config", "env-"]),
        ("dependencies", &["dependency"]),
        ("compliance", &["license"]),
        ("data", &["metadata"]),
    ];

    for (category, patterns) in CATEGORIES {
        if patterns.iter().any(|p| name.contains(p)) {
            return category;
        }
    }
    "development"
}

/// Migrate every skill directory under `source` into `agents_dir`.
///
/// Each migrated skill becomes `<agents_dir>/<name>/config.yaml` plus
/// `AGENT.md` (the markdown body with frontmatter stripped). Migrated
/// skills are tactical and preload-mode by construction.
pub fn migrate_skills(source: &Path, agents_dir: &Path) -> Result<MigrationReport> {
    std::fs::create_dir_all(agents_dir)
        .with_context(|| format!("failed to create {}", agents_dir.display()))?;

    let mut skill_dirs: Vec<_> = std::fs::read_dir(source)
        .with_context(|| format!("failed to read {}", source.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    skill_dirs.sort();

    let mut report = MigrationReport::default();

    for skill_dir in skill_dirs {
        let Some(name) = skill_dir.file_name().and_then(|s| s.to_str()).map(String::from)
        else {
            continue;
        };

        match migrate_skill(&skill_dir, &name, agents_dir) {
            Ok(true) => report.migrated.push(name),
            Ok(false) => {
                warn!("skipping {}: no markdown skill file", name);
                report.skipped.push(name);
            }
            Err(e) => return Err(e.context(format!("failed to migrate {}", name))),
        }
    }

    info!(
        "migrated {} skills to {} ({} skipped)",
        report.migrated.len(),
        agents_dir.display(),
        report.skipped.len()
    );

    Ok(report)
}

fn migrate_skill(skill_dir: &Path, name: &str, agents_dir: &Path) -> Result<bool> {
    let mut md_files: Vec<_> = std::fs::read_dir(skill_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "md"))
        .collect();
    md_files.sort();

    let Some(skill_file) = md_files.first() else {
        return Ok(false);
    };

    let content = std::fs::read_to_string(skill_file)?;
    let (frontmatter, body) = parse_frontmatter(&content)?;

    let description = frontmatter
        .get("description")
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| format!("{} skill", name));

    let doc = DeclarationDoc {
        name,
        description,
        version: "1.0.0",
        status: if STABLE_SKILLS.contains(&name) {
            "stable"
        } else {
            "draft"
        },
        tier: "tactical",
        category: categorize(name),
        requires_opus: false,
        triggers: TriggersDoc {
            keywords: frontmatter_keywords(&frontmatter),
        },
        runtime: RuntimeDoc { mode: "preload" },
    };

    let target_dir = agents_dir.join(name);
    std::fs::create_dir_all(&target_dir)?;
    std::fs::write(target_dir.join("config.yaml"), serde_yaml::to_string(&doc)?)?;
    std::fs::write(target_dir.join("AGENT.md"), body)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{load_catalog, RuntimeMode, Tier};
    use tempfile::TempDir;

    fn write_skill(source: &Path, name: &str, content: &str) {
        let dir = source.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("SKILL.md"), content).unwrap();
    }

    #[test]
    fn test_parse_frontmatter() {
        let (fm, body) = parse_frontmatter("---\ndescription: d\nkeywords: [a, b]\n---\n\nBody")
            .unwrap();
        assert_eq!(fm.get("description").unwrap().as_str(), Some("d"));
        assert_eq!(body, "Body");

        let (fm, body) = parse_frontmatter("No frontmatter here").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "No frontmatter here");
    }

    #[test]
    fn test_bare_string_keyword_becomes_list() {
        let (fm, _) = parse_frontmatter("---\nkeywords: solo\n---\nx").unwrap();
        assert_eq!(frontmatter_keywords(&fm), vec!["solo"]);
    }

    #[test]
    fn test_categorize() {
        assert_eq!(categorize("commit-writer"), "git");
        assert_eq!(categorize("tech-debt-scanner"), "code-quality");
        assert_eq!(categorize("license-checker"), "compliance");
        assert_eq!(categorize("mystery-helper"), "development");
    }

    #[test]
    fn test_migrated_skill_round_trips_through_loader() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("skills");
        let agents = temp.path().join("agents");
        write_skill(
            &source,
            "commit-writer",
            "---\ndescription: Writes commit messages\nkeywords: [commit, git]\n---\n\n# Commit Writer\n",
        );

        let report = migrate_skills(&source, &agents).unwrap();
        assert_eq!(report.migrated, vec!["commit-writer"]);

        let outcome = load_catalog(&agents).unwrap();
        assert!(outcome.issues.is_empty());
        let record = outcome.catalog.get("commit-writer").unwrap();
        assert_eq!(record.tier, Tier::Tactical);
        assert_eq!(record.runtime_mode, RuntimeMode::Preload);
        assert_eq!(record.keywords, vec!["commit", "git"]);
        assert_eq!(record.category, "git");
        assert_eq!(record.instructions, "# Commit Writer");
    }

    #[test]
    fn test_directory_without_markdown_is_skipped() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("skills");
        std::fs::create_dir_all(source.join("empty-dir")).unwrap();
        write_skill(&source, "real", "---\nkeywords: [x]\n---\nbody");

        let report = migrate_skills(&source, &temp.path().join("agents")).unwrap();
        assert_eq!(report.migrated, vec!["real"]);
        assert_eq!(report.skipped, vec!["empty-dir"]);
    }
}
