use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::input::norms::{COL_TASK, NUMERIC_COLUMNS};
use crate::model::result::ScoredResult;
use crate::report::ReportError;
use crate::report::table::{COL_CATEGORY, COL_PERCENTILE, COL_SCORE, COL_Z};

pub const SHEET_NAME: &str = "Résultats";

const TASK_WIDTH: f64 = 48.0;
const VALUE_WIDTH: f64 = 14.0;

fn color((r, g, b): (u8, u8, u8)) -> Color {
    Color::RGB(u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b))
}

/// Two decimals, as displayed in the text outputs.
fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 { 0.0 } else { r }
}

pub fn workbook_header() -> Vec<&'static str> {
    let mut cols: Vec<&'static str> = vec![COL_TASK, COL_CATEGORY];
    cols.extend(NUMERIC_COLUMNS);
    cols.extend([COL_SCORE, COL_Z, COL_PERCENTILE]);
    cols
}

/// Result workbook: task names in the category colour, percentile cells
/// filled with the band colour.
pub fn write_table_xlsx(results: &[ScoredResult], path: &Path) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_fmt = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let header = workbook_header();
    for (col, name) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header_fmt)?;
    }
    sheet.set_column_width(0, TASK_WIDTH)?;
    for col in 1..header.len() {
        sheet.set_column_width(col as u16, VALUE_WIDTH)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    let percentile_col = (header.len() - 1) as u16;
    for (i, r) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        let task_fmt = Format::new()
            .set_bold()
            .set_font_color(color(r.category.rgb()));
        sheet.write_string_with_format(row, 0, &r.task, &task_fmt)?;
        sheet.write_string(row, 1, r.category.label())?;

        let mut col = 2u16;
        for v in r.reference.values() {
            sheet.write_number(row, col, round2(v))?;
            col += 1;
        }
        sheet.write_number(row, col, round2(r.score))?;
        sheet.write_number(row, col + 1, round2(r.z_score))?;

        let pct = round2(r.percentile);
        match r.band {
            Some(band) => {
                let band_fmt = Format::new().set_background_color(color(band.rgb()));
                sheet.write_number_with_format(row, percentile_col, pct, &band_fmt)?;
            }
            None => {
                sheet.write_number(row, percentile_col, pct)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
