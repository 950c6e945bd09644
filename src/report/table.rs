use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::norms::{COL_TASK, NUMERIC_COLUMNS};
use crate::model::result::ScoredResult;
use crate::report::format_trimmed;

pub const COL_CATEGORY: &str = "Catégorie";
pub const COL_SCORE: &str = "Score Enfant";
pub const COL_Z: &str = "Z-Score";
pub const COL_PERCENTILE: &str = "Percentile (%)";

const STYLE_COLUMNS: [&str; 3] = ["Bande", "Couleur bande", "Couleur tâche"];

pub fn table_header() -> String {
    let mut cols: Vec<&str> = vec![COL_TASK, COL_CATEGORY];
    cols.extend(NUMERIC_COLUMNS);
    cols.extend([COL_SCORE, COL_Z, COL_PERCENTILE]);
    cols.extend(STYLE_COLUMNS);
    cols.join("\t")
}

pub fn render_table_row(r: &ScoredResult) -> String {
    let mut fields = Vec::with_capacity(18);
    fields.push(r.task.clone());
    fields.push(r.category.label().to_string());
    fields.extend(r.reference.values().iter().map(|&v| format_trimmed(v)));
    fields.push(format_trimmed(r.score));
    fields.push(format_trimmed(r.z_score));
    fields.push(format_trimmed(r.percentile));
    match r.band {
        Some(band) => {
            fields.push(band.label().to_string());
            fields.push(band.hex());
        }
        None => {
            fields.push(String::new());
            fields.push(String::new());
        }
    }
    fields.push(r.category.hex());
    fields.join("\t")
}

/// Result table with the styling carried as colour columns.
pub fn write_table_tsv(results: &[ScoredResult], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", table_header())?;
    for r in results {
        writeln!(w, "{}", render_table_row(r))?;
    }
    w.flush()
}
