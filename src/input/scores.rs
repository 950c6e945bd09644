use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::input::norms::COL_TASK;
use crate::input::{InputError, open_maybe_gz, parse_decimal};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawScore {
    pub task: String,
    pub value: f64,
}

impl RawScore {
    pub fn new(task: impl Into<String>, value: f64) -> Self {
        Self {
            task: task.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreEntryError {
    #[error("invalid value '{value}' for '{task}': enter a number")]
    NotNumeric { task: String, value: String },
    #[error("value '{value}' has no task name")]
    MissingTask { value: String },
    #[error("line '{line}' has no tab between task and value")]
    MissingSeparator { line: String },
}

/// A score entry refused at input time, kept for the report caveats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEntry {
    pub line: Option<usize>,
    pub task: String,
    pub value: String,
    pub reason: String,
}

impl RejectedEntry {
    fn from_error(line: Option<usize>, task: &str, value: &str, err: &ScoreEntryError) -> Self {
        Self {
            line,
            task: task.to_string(),
            value: value.to_string(),
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreSheet {
    pub scores: Vec<RawScore>,
    pub rejected: Vec<RejectedEntry>,
}

/// Validates one operator entry. Blank means the task was not administered.
pub fn parse_score_entry(task: &str, raw: &str) -> Result<Option<RawScore>, ScoreEntryError> {
    let task = task.trim();
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if task.is_empty() {
        return Err(ScoreEntryError::MissingTask {
            value: raw.to_string(),
        });
    }
    match parse_decimal(raw) {
        Some(value) => Ok(Some(RawScore::new(task, value))),
        None => Err(ScoreEntryError::NotNumeric {
            task: task.to_string(),
            value: raw.to_string(),
        }),
    }
}

pub fn parse_score_sheet(content: &str) -> ScoreSheet {
    let mut sheet = ScoreSheet::default();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let raw = line.trim_start_matches('\u{feff}');
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == COL_TASK {
            continue;
        }
        let Some((task, value)) = raw.split_once('\t') else {
            let err = ScoreEntryError::MissingSeparator {
                line: trimmed.to_string(),
            };
            warn!(line = line_no, "{err}");
            sheet
                .rejected
                .push(RejectedEntry::from_error(Some(line_no), "", trimmed, &err));
            continue;
        };
        let task = task.trim();
        let value = value.trim();
        if task == COL_TASK {
            continue;
        }
        match parse_score_entry(task, value) {
            Ok(Some(score)) => sheet.scores.push(score),
            Ok(None) => {}
            Err(err) => {
                warn!(line = line_no, task, value, "{err}");
                sheet
                    .rejected
                    .push(RejectedEntry::from_error(Some(line_no), task, value, &err));
            }
        }
    }
    sheet
}

pub fn load_score_sheet(path: &Path) -> Result<ScoreSheet, InputError> {
    let mut content = String::new();
    open_maybe_gz(path)?.read_to_string(&mut content)?;
    let sheet = parse_score_sheet(&content);
    info!(
        path = %path.display(),
        entries = sheet.scores.len(),
        rejected = sheet.rejected.len(),
        "loaded score sheet"
    );
    Ok(sheet)
}
