use std::collections::HashMap;

use tracing::debug;

use crate::input::{RawScore, ReferenceTable};
use crate::model::bands::PercentileBand;
use crate::model::normal::{percentile, z_score};
use crate::model::result::{ScoreOrigin, ScoredResult};
use crate::tasks::mapping::category_of;

/// Joins scores onto the reference table in table order.
///
/// Entered scores precede derived ones and the first value per task wins, so
/// an operator-entered interference value shadows the derived one.
pub fn run_stage3(
    table: &ReferenceTable,
    entered: &[RawScore],
    derived: &[RawScore],
) -> Vec<ScoredResult> {
    let mut first: HashMap<&str, (f64, ScoreOrigin)> = HashMap::new();
    let tagged = entered
        .iter()
        .map(|s| (s, ScoreOrigin::Entered))
        .chain(derived.iter().map(|s| (s, ScoreOrigin::Interference)));
    for (score, origin) in tagged {
        first
            .entry(score.task.as_str())
            .or_insert((score.value, origin));
    }

    let mut results = Vec::with_capacity(first.len());
    for row in table.rows() {
        let Some(&(score, origin)) = first.get(row.task.as_str()) else {
            continue;
        };
        let Some(z) = z_score(score, row.mean, row.sd) else {
            debug!(task = %row.task, sd = row.sd, "z-score undefined; row excluded");
            continue;
        };
        let pct = percentile(z);
        results.push(ScoredResult {
            task: row.task.clone(),
            category: category_of(&row.task),
            origin,
            score,
            z_score: z,
            percentile: pct,
            band: PercentileBand::classify(pct),
            reference: row.clone(),
        });
    }
    results
}
