//! Catalog loader
//!
//! Walks an agents directory and builds a [`Catalog`] from its immediate
//! subdirectories. Each agent lives in a directory named after it, holding a
//! `config.yaml` and an optional `AGENT.md` with free-text instructions.
//!
//! One bad declaration never prevents the rest of the catalog from loading:
//! per-entry problems are collected into the returned [`LoadOutcome`]. Only
//! an unreadable root aborts the load.

use crate::agent::catalog::Catalog;
use crate::agent::schema::{self, RawAgentConfig, Validated};
use crate::error::{LoadError, LoadIssue, LoadIssueKind, SchemaWarning};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-agent configuration document.
pub const CONFIG_FILE: &str = "config.yaml";

/// Per-agent instructions document. Optional; missing means empty.
pub const INSTRUCTIONS_FILE: &str = "AGENT.md";

/// Result of one load pass: the catalog that could be built, plus whatever
/// went wrong or looked deprecated along the way.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub issues: Vec<LoadIssue>,
    pub warnings: Vec<SchemaWarning>,
}

/// Load all agent declarations under `root`.
///
/// Subdirectories are visited in lexicographic order, which fixes catalog
/// iteration order and therefore the selector's tie-break. Subdirectories
/// without a `config.yaml` are skipped silently; not every directory is an
/// agent. Loading is idempotent for an unchanged tree.
pub fn load_catalog(root: &Path) -> Result<LoadOutcome, LoadError> {
    let entries = std::fs::read_dir(root).map_err(|source| LoadError::DirectoryUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut outcome = LoadOutcome::default();

    for dir in dirs {
        let Some(name) = dir.file_name().and_then(|s| s.to_str()).map(String::from) else {
            continue;
        };

        if !dir.join(CONFIG_FILE).exists() {
            debug!("skipping {}: no {}", name, CONFIG_FILE);
            continue;
        }

        match load_declaration(&dir) {
            Ok(validated) => {
                for message in validated.warnings {
                    warn!("agent {}: {}", name, message);
                    outcome.warnings.push(SchemaWarning {
                        agent: name.clone(),
                        message,
                    });
                }
                debug!("loaded agent: {}", name);
                outcome.catalog.insert(validated.record);
            }
            Err(kind) => {
                warn!("failed to load agent {}: {}", name, kind);
                outcome.issues.push(LoadIssue { agent: name, kind });
            }
        }
    }

    info!(
        "loaded {} agents from {} ({} skipped)",
        outcome.catalog.len(),
        root.display(),
        outcome.issues.len()
    );

    Ok(outcome)
}

/// Load and validate a single agent declaration directory.
pub fn load_declaration(dir: &Path) -> Result<Validated, LoadIssueKind> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Err(LoadIssueKind::MissingConfig);
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(LoadIssueKind::ConfigUnreadable)?;
    let raw: RawAgentConfig = serde_yaml::from_str(&content)?;

    let dir_name = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let instructions =
        std::fs::read_to_string(dir.join(INSTRUCTIONS_FILE)).unwrap_or_default();

    Ok(schema::validate(raw, dir_name, instructions)?)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{tactical_config, write_agent};
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_orders_lexicographically() {
        let temp = TempDir::new().unwrap();
        write_agent(temp.path(), "zeta", &tactical_config("zeta", &["z"]), None);
        write_agent(temp.path(), "alpha", &tactical_config("alpha", &["a"]), None);
        write_agent(temp.path(), "mid", &tactical_config("mid", &["m"]), None);

        let outcome = load_catalog(temp.path()).unwrap();
        let order: Vec<&str> = outcome.catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_skips_directories_without_config() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();
        write_agent(temp.path(), "real", &tactical_config("real", &["x"]), None);

        let outcome = load_catalog(temp.path()).unwrap();
        assert_eq!(outcome.catalog.len(), 1);
        // Not an agent, not an error
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_partial_failure_isolation() {
        let temp = TempDir::new().unwrap();
        write_agent(temp.path(), "good-one", &tactical_config("good-one", &["a"]), None);
        write_agent(
            temp.path(),
            "bad-tier",
            "name: bad-tier\ndescription: d\ntier: imperial\ntriggers:\n  keywords: [x]\n",
            None,
        );
        write_agent(temp.path(), "good-two", &tactical_config("good-two", &["b"]), None);

        let outcome = load_catalog(temp.path()).unwrap();
        assert_eq!(outcome.catalog.len(), 2);
        assert!(outcome.catalog.contains("good-one"));
        assert!(outcome.catalog.contains("good-two"));
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].agent, "bad-tier");
    }

    #[test]
    fn test_invalid_yaml_is_per_entry() {
        let temp = TempDir::new().unwrap();
        write_agent(temp.path(), "mangled", "name: [unclosed\n", None);
        write_agent(temp.path(), "ok", &tactical_config("ok", &["x"]), None);

        let outcome = load_catalog(temp.path()).unwrap();
        assert_eq!(outcome.catalog.len(), 1);
        assert_eq!(outcome.issues.len(), 1);
        assert!(matches!(outcome.issues[0].kind, LoadIssueKind::InvalidYaml(_)));
    }

    #[test]
    fn test_missing_instructions_is_empty_string() {
        let temp = TempDir::new().unwrap();
        write_agent(temp.path(), "silent", &tactical_config("silent", &["x"]), None);
        write_agent(temp.path(), "wordy", &tactical_config("wordy", &["y"]), Some("# Wordy\n"));

        let outcome = load_catalog(temp.path()).unwrap();
        assert_eq!(outcome.catalog.get("silent").unwrap().instructions, "");
        assert_eq!(outcome.catalog.get("wordy").unwrap().instructions, "# Wordy\n");
    }

    #[test]
    fn test_legacy_shape_warning_collected() {
        let temp = TempDir::new().unwrap();
        write_agent(
            temp.path(),
            "old-timer",
            "name: old-timer\ndescription: d\ntier: tactical\ntriggers:\n  keywords: [x]\nruntime:\n  mode: on-demand\n  preferred: native\n",
            None,
        );

        let outcome = load_catalog(temp.path()).unwrap();
        assert!(outcome.catalog.contains("old-timer"));
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].agent, "old-timer");
    }

    #[test]
    fn test_idempotent_load() {
        let temp = TempDir::new().unwrap();
        write_agent(temp.path(), "a", &tactical_config("a", &["alpha"]), Some("body"));
        write_agent(temp.path(), "b", &tactical_config("b", &["beta"]), None);

        let first = load_catalog(temp.path()).unwrap();
        let second = load_catalog(temp.path()).unwrap();
        assert_eq!(first.catalog, second.catalog);
    }

    #[test]
    fn test_unreadable_root_is_fatal() {
        let err = load_catalog(Path::new("/nonexistent/agents")).unwrap_err();
        assert!(matches!(err, LoadError::DirectoryUnreadable { .. }));
    }

    #[test]
    fn test_load_declaration_missing_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        std::fs::create_dir(&dir).unwrap();
        let err = load_declaration(&dir).unwrap_err();
        assert!(matches!(err, LoadIssueKind::MissingConfig));
    }
}
