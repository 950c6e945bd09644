use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::{debug, info};

pub mod norms;
pub mod prompt;
pub mod scores;

pub use norms::{ReferenceRow, ReferenceTable, load_reference_table, parse_reference_table};
pub use scores::{RawScore, RejectedEntry, ScoreEntryError, ScoreSheet, load_score_sheet};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("unknown age group '{requested}' (available: {available})")]
    UnknownAgeGroup { requested: String, available: String },
    #[error("{origin}: missing column '{column}'")]
    MissingColumn { origin: String, column: &'static str },
    #[error("{origin}: duplicate task '{task}'")]
    DuplicateTask { origin: String, task: String },
    #[error("{origin}:{line}: negative standard deviation for '{task}'")]
    NegativeSd {
        origin: String,
        line: usize,
        task: String,
    },
    #[error("parse error: {0}")]
    Parse(String),
}

const TABLE_SUFFIXES: [&str; 2] = [".tsv.gz", ".tsv"];

/// Directory of reference tables, one file per age group.
#[derive(Debug, Clone)]
pub struct NormsLibrary {
    root: PathBuf,
    groups: BTreeMap<String, PathBuf>,
}

impl NormsLibrary {
    pub fn open(dir: &Path) -> Result<Self, InputError> {
        if !dir.is_dir() {
            return Err(InputError::MissingInput(format!(
                "norms directory {} not found",
                dir.display()
            )));
        }
        let mut groups = BTreeMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(label) = age_label(name) else {
                debug!(file = %path.display(), "skipping non-table file");
                continue;
            };
            if groups.contains_key(&label) {
                return Err(InputError::Parse(format!(
                    "age group '{label}' is defined twice in {}",
                    dir.display()
                )));
            }
            groups.insert(label, path);
        }
        if groups.is_empty() {
            return Err(InputError::MissingInput(format!(
                "no reference table (*.tsv, *.tsv.gz) in {}",
                dir.display()
            )));
        }
        info!(
            root = %dir.display(),
            age_groups = groups.len(),
            "discovered reference tables"
        );
        Ok(Self {
            root: dir.to_path_buf(),
            groups,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn age_groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn load(&self, age_group: &str) -> Result<ReferenceTable, InputError> {
        let path = self
            .groups
            .get(age_group)
            .ok_or_else(|| InputError::UnknownAgeGroup {
                requested: age_group.to_string(),
                available: self.age_groups().collect::<Vec<_>>().join(", "),
            })?;
        load_reference_table(path, age_group)
    }
}

fn age_label(file_name: &str) -> Option<String> {
    for suffix in TABLE_SUFFIXES {
        if let Some(stem) = file_name.strip_suffix(suffix) {
            let stem = stem.trim();
            if stem.is_empty() || stem.starts_with('.') {
                return None;
            }
            return Some(stem.to_string());
        }
    }
    None
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parses a finite decimal number, accepting a decimal comma.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1).parse().ok()?
    } else {
        trimmed.parse().ok()?
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
