use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::input::RejectedEntry;
use crate::model::interference::InterferenceValue;
use crate::model::result::ScoredResult;
use crate::pipeline::ScoringOutcome;
use crate::report::{ReportError, TOOL_NAME, band_counts};

#[derive(Debug, Serialize)]
pub struct ToolMeta {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BandSummary {
    pub band: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub tool: ToolMeta,
    pub child_id: &'a str,
    pub age_group: &'a str,
    pub interference_policy: &'static str,
    pub n_scored: usize,
    pub results: &'a [ScoredResult],
    pub interference: &'a [InterferenceValue],
    pub bands: Vec<BandSummary>,
    pub missing_norms: &'a [String],
    pub rejected_entries: &'a [RejectedEntry],
    pub chart_tasks: &'a [String],
    pub warnings: &'a [String],
}

pub fn build_summary<'a>(
    outcome: &'a ScoringOutcome,
    chart_tasks: &'a [String],
) -> Summary<'a> {
    Summary {
        tool: ToolMeta {
            name: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
        },
        child_id: &outcome.child_id,
        age_group: &outcome.age_group,
        interference_policy: outcome.policy.label(),
        n_scored: outcome.results.len(),
        results: &outcome.results,
        interference: &outcome.interference,
        bands: band_counts(&outcome.results)
            .into_iter()
            .map(|s| BandSummary {
                band: s.band.label(),
                count: s.count,
            })
            .collect(),
        missing_norms: &outcome.without_norms,
        rejected_entries: &outcome.rejected,
        chart_tasks,
        warnings: &outcome.warnings,
    }
}

pub fn write_summary_json(summary: &Summary<'_>, path: &Path) -> Result<(), ReportError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}
