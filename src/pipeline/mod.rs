use std::time::Instant;

use tracing::{debug, info};

use crate::input::{RawScore, ReferenceTable, RejectedEntry};
use crate::model::interference::{InterferencePolicy, InterferenceValue};
use crate::model::result::ScoredResult;

pub mod stage1_entry;
pub mod stage2_interference;
pub mod stage3_score;
pub mod stage4_report;

use stage1_entry::run_stage1;
use stage2_interference::run_stage2;
use stage3_score::run_stage3;

/// Everything one scoring pass needs, borrowed for the duration of the pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoringRequest<'a> {
    pub child_id: &'a str,
    pub table: &'a ReferenceTable,
    pub scores: &'a [RawScore],
    pub rejected: &'a [RejectedEntry],
    pub policy: InterferencePolicy,
}

#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    pub child_id: String,
    pub age_group: String,
    pub policy: InterferencePolicy,
    pub results: Vec<ScoredResult>,
    /// All four pairs, including zero and underived values.
    pub interference: Vec<InterferenceValue>,
    pub without_norms: Vec<String>,
    pub rejected: Vec<RejectedEntry>,
    pub warnings: Vec<String>,
}

pub fn score_request(req: &ScoringRequest<'_>) -> ScoringOutcome {
    info!(
        child_id = req.child_id,
        age_group = %req.table.age_group(),
        entries = req.scores.len(),
        policy = req.policy.label(),
        "scoring started"
    );

    let stage1 = timed("entry", || run_stage1(req.table, req.scores));
    let stage2 = timed("interference", || run_stage2(req.scores, req.policy));
    let results = timed("score", || {
        run_stage3(req.table, &stage1.accepted, &stage2.derived)
    });

    let mut warnings = Vec::new();
    for task in &stage1.without_norms {
        warnings.push(format!("Pas de normes disponibles pour {task}"));
    }
    for value in &stage2.values {
        if value.substituted.len() == 1 && value.value.is_some_and(|v| v != 0.0) {
            warnings.push(format!(
                "{}: {} non saisi, compté comme 0",
                value.task, value.substituted[0]
            ));
        }
    }
    for entry in req.rejected {
        warnings.push(entry.reason.clone());
    }

    info!(
        age_group = %req.table.age_group(),
        scored = results.len(),
        derived = stage2.derived.len(),
        without_norms = stage1.without_norms.len(),
        "scoring finished"
    );

    ScoringOutcome {
        child_id: req.child_id.to_string(),
        age_group: req.table.age_group().to_string(),
        policy: req.policy,
        results,
        interference: stage2.values,
        without_norms: stage1.without_norms,
        rejected: req.rejected.to_vec(),
        warnings,
    }
}

fn timed<T>(stage: &'static str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    debug!(stage, "stage started");
    let out = f();
    info!(
        stage,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "stage finished"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
