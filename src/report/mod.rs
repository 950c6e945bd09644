use thiserror::Error;

use crate::model::bands::PercentileBand;
use crate::model::result::ScoredResult;
use crate::tasks::Category;

pub mod archive;
pub mod chart;
pub mod json;
pub mod table;
pub mod text;
pub mod workbook;

pub const TOOL_NAME: &str = "comprendre-scoring";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chart rendering failed: {0}")]
    Chart(String),
    #[error("workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("archive error: {0}")]
    Archive(String),
    #[error("invalid child id: {0}")]
    InvalidChildId(String),
}

#[derive(Debug, Clone)]
pub struct BandStat {
    pub band: PercentileBand,
    pub count: usize,
}

/// Two decimals, trailing zeros and dot removed: `12.50` -> `12.5`, `3.00` -> `3`.
pub fn format_trimmed(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// File-name-safe child identifier. Fails on ids that are blank after trimming.
pub fn sanitize_child_id(child_id: &str) -> Result<String, ReportError> {
    let trimmed = child_id.trim();
    if trimmed.is_empty() {
        return Err(ReportError::InvalidChildId("empty".to_string()));
    }
    let clean: String = trimmed
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if clean.chars().all(|c| c == '.' || c == '_') {
        return Err(ReportError::InvalidChildId(child_id.to_string()));
    }
    Ok(clean)
}

pub fn bundle_dir_name(safe_id: &str) -> String {
    format!("{safe_id}_Resultats_Comprendre")
}

pub fn archive_file_name(safe_id: &str) -> String {
    format!("{}.zip", bundle_dir_name(safe_id))
}

pub fn table_file_name(safe_id: &str, ext: &str) -> String {
    format!("{safe_id}_Tableau_Comprendre.{ext}")
}

pub fn chart_file_name(safe_id: &str, ext: &str) -> String {
    format!("{safe_id}_Graphique_Comprendre.{ext}")
}

pub fn band_counts(results: &[ScoredResult]) -> Vec<BandStat> {
    PercentileBand::ALL
        .into_iter()
        .map(|band| BandStat {
            band,
            count: results.iter().filter(|r| r.band == Some(band)).count(),
        })
        .collect()
}

/// Results of one category, in result order. Empty categories are omitted.
pub fn by_category<'a>(results: &'a [&'a ScoredResult]) -> Vec<(Category, Vec<&'a ScoredResult>)> {
    let mut out = Vec::new();
    for category in Category::ALL {
        let rows: Vec<&ScoredResult> = results
            .iter()
            .copied()
            .filter(|r| r.category == category)
            .collect();
        if !rows.is_empty() {
            out.push((category, rows));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
