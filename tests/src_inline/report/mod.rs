use std::io::Read;

use tempfile::TempDir;

use super::archive::write_zip;
use super::table::{render_table_row, table_header};
use super::workbook::{workbook_header, write_table_xlsx};
use super::*;
use crate::input::ReferenceRow;
use crate::model::result::{ScoreOrigin, ScoredResult};

fn result(task: &str, category: Category, percentile: f64) -> ScoredResult {
    ScoredResult {
        task: task.to_string(),
        category,
        origin: ScoreOrigin::Entered,
        score: 65.0,
        z_score: 1.5,
        percentile,
        band: PercentileBand::classify(percentile),
        reference: ReferenceRow {
            task: task.to_string(),
            mean: 50.0,
            sd: 10.0,
            minimum: 20.0,
            p5: 33.5,
            p10: 37.25,
            q1: 43.0,
            median: 50.0,
            q3: 57.0,
            p90: 63.0,
            maximum: 80.0,
        },
    }
}

#[test]
fn test_format_trimmed() {
    assert_eq!(format_trimmed(12.5), "12.5");
    assert_eq!(format_trimmed(3.0), "3");
    assert_eq!(format_trimmed(93.319_279), "93.32");
    assert_eq!(format_trimmed(-0.001), "0");
    assert_eq!(format_trimmed(100.0), "100");
    assert_eq!(format_trimmed(-1.5), "-1.5");
}

#[test]
fn test_sanitize_child_id() {
    assert_eq!(sanitize_child_id(" E01 ").unwrap(), "E01");
    assert_eq!(sanitize_child_id("a/b:c").unwrap(), "a_b_c");
    assert!(sanitize_child_id("   ").is_err());
    assert!(sanitize_child_id("..").is_err());
    assert_eq!(bundle_dir_name("E01"), "E01_Resultats_Comprendre");
    assert_eq!(archive_file_name("E01"), "E01_Resultats_Comprendre.zip");
    assert_eq!(table_file_name("E01", "xlsx"), "E01_Tableau_Comprendre.xlsx");
    assert_eq!(chart_file_name("E01", "png"), "E01_Graphique_Comprendre.png");
}

#[test]
fn test_band_counts_and_grouping() {
    let results = vec![
        result("A", Category::Langage, 93.3),
        result("B", Category::Inhibition, 2.0),
        result("C", Category::Langage, 50.0),
    ];
    let counts = band_counts(&results);
    assert_eq!(counts.len(), 5);
    assert_eq!(counts[0].count, 1);
    assert_eq!(counts[2].count, 1);
    assert_eq!(counts[3].count, 1);

    let refs: Vec<&ScoredResult> = results.iter().collect();
    let groups = by_category(&refs);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, Category::Langage);
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[1].0, Category::Inhibition);
}

#[test]
fn test_table_row_columns() {
    let header = table_header();
    let row = render_table_row(&result("Stock Lexical", Category::Langage, 93.319_279));
    assert_eq!(header.split('\t').count(), 18);
    let fields: Vec<&str> = row.split('\t').collect();
    assert_eq!(fields.len(), 18);
    assert_eq!(fields[0], "Stock Lexical");
    assert_eq!(fields[1], "Langage");
    assert_eq!(fields[7], "43");
    assert_eq!(fields[12], "65");
    assert_eq!(fields[13], "1.5");
    assert_eq!(fields[14], "93.32");
    assert_eq!(fields[15], "85-97");
    assert_eq!(fields[16], "8DDF9B");
    assert_eq!(fields[17], "3798DA");
}

#[test]
fn test_chart_renders_svg() {
    let results = vec![
        result("Stock Lexical", Category::Langage, 93.3),
        result("Lecture de mots", Category::Autre, 10.0),
    ];
    let refs: Vec<&ScoredResult> = results.iter().collect();
    let svg = chart::render_chart_svg(&refs, chart::CHART_TITLE).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Stock"));
    assert!(svg.contains("AUTRE"));
}

#[test]
fn test_chart_renders_png() {
    let results = vec![result("Stock Lexical", Category::Langage, 93.3)];
    let refs: Vec<&ScoredResult> = results.iter().collect();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("E01_Graphique_Comprendre.png");
    chart::render_chart_png(&refs, chart::CHART_TITLE, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

fn zip_entry(path: &std::path::Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
    let mut out = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
    out
}

#[test]
fn test_workbook_colours_task_and_percentile_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("E01_Tableau_Comprendre.xlsx");
    let results = vec![
        result("Stock Lexical", Category::Langage, 93.3),
        result("Inhibition verbale interférence temps", Category::Inhibition, 2.0),
    ];
    write_table_xlsx(&results, &path).unwrap();

    assert_eq!(workbook_header().len(), 15);
    let strings = zip_entry(&path, "xl/sharedStrings.xml");
    assert!(strings.contains("Stock Lexical"));
    assert!(strings.contains("Percentile (%)"));
    let styles = zip_entry(&path, "xl/styles.xml").to_uppercase();
    assert!(styles.contains("8DDF9B"));
    assert!(styles.contains("D44646"));
    assert!(styles.contains("3798DA"));
    assert!(styles.contains("8353DA"));
}

#[test]
fn test_zip_keeps_entry_order_and_content() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("report.txt");
    let b = dir.path().join("summary.json");
    std::fs::write(&a, "Résultats").unwrap();
    std::fs::write(&b, "{}").unwrap();
    let zip_path = dir.path().join("bundle.zip");
    write_zip(&zip_path, &[a, b]).unwrap();

    let archive = zip::ZipArchive::new(std::fs::File::open(&zip_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);
    assert_eq!(
        archive.file_names().collect::<Vec<_>>(),
        vec!["report.txt", "summary.json"]
    );
    assert_eq!(zip_entry(&zip_path, "report.txt"), "Résultats");
    assert_eq!(zip_entry(&zip_path, "summary.json"), "{}");
}
