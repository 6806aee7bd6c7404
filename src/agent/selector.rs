//! Agent selection
//!
//! Picks the best agent for a free-text task description by keyword scoring,
//! with an explicit-name escape hatch that bypasses scoring entirely.

use crate::agent::catalog::Catalog;
use crate::agent::record::AgentRecord;
use tracing::{info, warn};

/// Select the best agent for a task.
///
/// Priority order:
/// 1. `explicit` names a registered agent: that agent, regardless of score.
/// 2. Highest keyword [`match_score`](AgentRecord::match_score) above zero;
///    ties go to the first record in catalog iteration order (load order,
///    lexicographic by directory name).
/// 3. Otherwise `None`.
pub fn select<'a>(
    catalog: &'a Catalog,
    task_description: &str,
    explicit: Option<&str>,
) -> Option<&'a AgentRecord> {
    if let Some(name) = explicit {
        if let Some(record) = catalog.get(name) {
            info!("selected explicit agent: {}", name);
            return Some(record);
        }
        warn!("requested agent not found: {}", name);
    }

    let mut best: Option<(usize, &AgentRecord)> = None;
    for record in catalog.iter() {
        let score = record.match_score(task_description);
        if score == 0 {
            continue;
        }
        // Strictly-greater keeps the first record on ties.
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, record));
        }
    }

    match best {
        Some((score, record)) => {
            info!(
                "selected agent by keyword match: {} (score: {})",
                record.name, score
            );
            Some(record)
        }
        None => {
            warn!("no suitable agent found");
            None
        }
    }
}
