use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::model::result::ScoredResult;
use crate::pipeline::ScoringOutcome;
use crate::report::archive::write_zip;
use crate::report::chart::{CHART_TITLE, render_chart_png, render_chart_svg};
use crate::report::json::{build_summary, write_summary_json};
use crate::report::table::write_table_tsv;
use crate::report::text::render_report_text;
use crate::report::workbook::write_table_xlsx;
use crate::report::{
    ReportError, archive_file_name, bundle_dir_name, chart_file_name, sanitize_child_id,
    table_file_name,
};

#[derive(Debug, Clone)]
pub struct BundlePaths {
    pub dir: PathBuf,
    pub workbook: PathBuf,
    pub table: PathBuf,
    pub chart_png: Option<PathBuf>,
    pub chart_svg: Option<PathBuf>,
    pub summary: PathBuf,
    pub report: PathBuf,
    /// Zip of every file above, written next to `dir`.
    pub archive: PathBuf,
}

impl BundlePaths {
    fn archived_files(&self) -> Vec<PathBuf> {
        let mut files = vec![self.workbook.clone()];
        files.extend(self.chart_png.iter().cloned());
        files.extend(self.chart_svg.iter().cloned());
        files.extend([self.table.clone(), self.summary.clone(), self.report.clone()]);
        files
    }
}

#[derive(Debug, Clone)]
pub struct ChartSelection<'a> {
    pub results: Vec<&'a ScoredResult>,
    pub unknown: Vec<String>,
}

/// Resolves the chart task list. `None` selects every scored task.
///
/// Selected rows keep result order; names that were not scored are reported.
pub fn select_chart_results<'a>(
    results: &'a [ScoredResult],
    selection: Option<&[String]>,
) -> ChartSelection<'a> {
    let Some(wanted) = selection else {
        return ChartSelection {
            results: results.iter().collect(),
            unknown: Vec::new(),
        };
    };
    let unknown = wanted
        .iter()
        .filter(|w| !results.iter().any(|r| &r.task == *w))
        .cloned()
        .collect();
    let results = results
        .iter()
        .filter(|r| wanted.iter().any(|w| w == &r.task))
        .collect();
    ChartSelection { results, unknown }
}

pub fn write_bundle(
    outcome: &ScoringOutcome,
    out_dir: &Path,
    selection: Option<&[String]>,
) -> Result<BundlePaths, ReportError> {
    let safe_id = sanitize_child_id(&outcome.child_id)?;
    let dir = out_dir.join(bundle_dir_name(&safe_id));
    fs::create_dir_all(&dir)?;

    let workbook = dir.join(table_file_name(&safe_id, "xlsx"));
    write_table_xlsx(&outcome.results, &workbook)?;
    let table = dir.join(table_file_name(&safe_id, "tsv"));
    write_table_tsv(&outcome.results, &table)?;

    let chosen = select_chart_results(&outcome.results, selection);
    for task in &chosen.unknown {
        warn!(task = %task, "chart task was not scored; skipped");
    }
    let chart_tasks: Vec<String> = chosen.results.iter().map(|r| r.task.clone()).collect();
    let (chart_png, chart_svg) = if chosen.results.is_empty() {
        warn!("no task selected for the chart; chart not written");
        (None, None)
    } else {
        let svg = render_chart_svg(&chosen.results, CHART_TITLE)?;
        let svg_path = dir.join(chart_file_name(&safe_id, "svg"));
        fs::write(&svg_path, svg)?;
        let png_path = dir.join(chart_file_name(&safe_id, "png"));
        let png = match render_chart_png(&chosen.results, CHART_TITLE, &png_path) {
            Ok(()) => Some(png_path),
            Err(err) => {
                warn!(error = %err, "PNG chart not rendered; the SVG chart is kept");
                let _ = fs::remove_file(&png_path);
                None
            }
        };
        (png, Some(svg_path))
    };

    let summary_path = dir.join("summary.json");
    let summary = build_summary(outcome, &chart_tasks);
    write_summary_json(&summary, &summary_path)?;

    let report = dir.join("report.txt");
    fs::write(&report, render_report_text(outcome))?;

    let paths = BundlePaths {
        archive: out_dir.join(archive_file_name(&safe_id)),
        dir,
        workbook,
        table,
        chart_png,
        chart_svg,
        summary: summary_path,
        report,
    };
    write_zip(&paths.archive, &paths.archived_files())?;

    info!(
        bundle = %paths.dir.display(),
        archive = %paths.archive.display(),
        rows = outcome.results.len(),
        chart_rows = chart_tasks.len(),
        png = paths.chart_png.is_some(),
        "report bundle written"
    );
    Ok(paths)
}
