use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::input::{InputError, open_maybe_gz, parse_decimal};

pub const COL_TASK: &str = "Tâche";
pub const COL_MEAN: &str = "Moyenne";
pub const COL_SD: &str = "Ecart-type";

/// Numeric columns in the order they are stored on [`ReferenceRow`].
pub const NUMERIC_COLUMNS: [&str; 10] = [
    COL_MEAN,
    COL_SD,
    "Minimum",
    "5e percentile",
    "10e percentile",
    "Q1",
    "Q2 - mediane",
    "Q3",
    "90e percentile",
    "Maximum",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub task: String,
    pub mean: f64,
    pub sd: f64,
    pub minimum: f64,
    pub p5: f64,
    pub p10: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub p90: f64,
    pub maximum: f64,
}

impl ReferenceRow {
    fn from_values(task: String, v: [f64; 10]) -> Self {
        Self {
            task,
            mean: v[0],
            sd: v[1],
            minimum: v[2],
            p5: v[3],
            p10: v[4],
            q1: v[5],
            median: v[6],
            q3: v[7],
            p90: v[8],
            maximum: v[9],
        }
    }

    /// Descriptive columns in [`NUMERIC_COLUMNS`] order.
    pub fn values(&self) -> [f64; 10] {
        [
            self.mean,
            self.sd,
            self.minimum,
            self.p5,
            self.p10,
            self.q1,
            self.median,
            self.q3,
            self.p90,
            self.maximum,
        ]
    }
}

/// Norms of one age group. Task names are unique; row order is the file order.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    age_group: String,
    rows: Vec<ReferenceRow>,
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    pub fn new(age_group: &str, rows: Vec<ReferenceRow>) -> Result<Self, InputError> {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if index.insert(row.task.clone(), i).is_some() {
                return Err(InputError::DuplicateTask {
                    origin: age_group.to_string(),
                    task: row.task.clone(),
                });
            }
        }
        Ok(Self {
            age_group: age_group.to_string(),
            rows,
            index,
        })
    }

    pub fn age_group(&self) -> &str {
        &self.age_group
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn get(&self, task: &str) -> Option<&ReferenceRow> {
        self.index.get(task).map(|&i| &self.rows[i])
    }

    pub fn contains(&self, task: &str) -> bool {
        self.index.contains_key(task)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn load_reference_table(path: &Path, age_group: &str) -> Result<ReferenceTable, InputError> {
    let reader = open_maybe_gz(path)?;
    let table = parse_reference_table(reader, age_group, &path.display().to_string())?;
    debug!(
        age_group,
        rows = table.len(),
        path = %path.display(),
        "loaded reference table"
    );
    Ok(table)
}

pub fn parse_reference_table<R: BufRead>(
    mut reader: R,
    age_group: &str,
    origin: &str,
) -> Result<ReferenceTable, InputError> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(InputError::Parse(format!("{origin}: reference table is empty")));
    }
    let header: Vec<String> = buf
        .trim_end_matches(['\r', '\n'])
        .trim_start_matches('\u{feff}')
        .split('\t')
        .map(|s| s.trim().to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize, InputError> {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| InputError::MissingColumn {
                origin: origin.to_string(),
                column: name,
            })
    };
    let task_col = column(COL_TASK)?;
    let mut numeric_cols = [0usize; 10];
    for (slot, name) in numeric_cols.iter_mut().zip(NUMERIC_COLUMNS) {
        *slot = column(name)?;
    }

    let mut rows: Vec<ReferenceRow> = Vec::new();
    let mut first_line: HashMap<String, usize> = HashMap::new();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let task = fields.get(task_col).map(|s| s.trim()).unwrap_or("");
        if task.is_empty() {
            warn!(origin, line = line_no, "reference row has no task name; dropped");
            continue;
        }

        let mut values = [0f64; 10];
        let mut incomplete = None;
        for (i, &col) in numeric_cols.iter().enumerate() {
            match fields.get(col).and_then(|s| parse_decimal(s)) {
                Some(v) => values[i] = v,
                None => {
                    incomplete = Some(NUMERIC_COLUMNS[i]);
                    break;
                }
            }
        }
        if let Some(col) = incomplete {
            warn!(
                origin,
                line = line_no,
                task,
                column = col,
                "reference row has a missing or non-numeric value; dropped"
            );
            continue;
        }
        if values[1] < 0.0 {
            return Err(InputError::NegativeSd {
                origin: origin.to_string(),
                line: line_no,
                task: task.to_string(),
            });
        }
        if let Some(first) = first_line.insert(task.to_string(), line_no) {
            debug!(origin, task, first, second = line_no, "duplicate task row");
            return Err(InputError::DuplicateTask {
                origin: origin.to_string(),
                task: task.to_string(),
            });
        }
        rows.push(ReferenceRow::from_values(task.to_string(), values));
    }

    ReferenceTable::new(age_group, rows)
}
