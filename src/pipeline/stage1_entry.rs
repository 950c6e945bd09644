use std::collections::BTreeSet;

use tracing::warn;

use crate::input::{RawScore, ReferenceTable};
use crate::tasks::defs::entry_tasks;

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub accepted: Vec<RawScore>,
    /// Form tasks first, then unknown entered tasks, each once.
    pub without_norms: Vec<String>,
}

/// Drops entries that have no reference row and lists every task lacking a norm.
pub fn run_stage1(table: &ReferenceTable, scores: &[RawScore]) -> Stage1Output {
    let mut without_norms: Vec<String> = entry_tasks()
        .filter(|t| !table.contains(t))
        .map(str::to_string)
        .collect();
    let mut seen: BTreeSet<String> = without_norms.iter().cloned().collect();

    let mut accepted = Vec::with_capacity(scores.len());
    for score in scores {
        if table.contains(&score.task) {
            accepted.push(score.clone());
            continue;
        }
        warn!(
            age_group = %table.age_group(),
            task = %score.task,
            "no norm available; entry ignored"
        );
        if seen.insert(score.task.clone()) {
            without_norms.push(score.task.clone());
        }
    }

    Stage1Output {
        accepted,
        without_norms,
    }
}
