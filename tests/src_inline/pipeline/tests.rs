use tempfile::TempDir;

use super::stage1_entry::run_stage1;
use super::stage4_report::{select_chart_results, write_bundle};
use super::{ScoringRequest, score_request};
use crate::input::{RawScore, ReferenceRow, ReferenceTable, RejectedEntry};
use crate::model::bands::PercentileBand;
use crate::model::interference::InterferencePolicy;
use crate::model::result::ScoreOrigin;
use crate::tasks::Category;
use crate::tasks::defs::*;

fn row(task: &str, mean: f64, sd: f64) -> ReferenceRow {
    ReferenceRow {
        task: task.to_string(),
        mean,
        sd,
        minimum: mean - 2.0 * sd,
        p5: mean - 1.6 * sd,
        p10: mean - 1.3 * sd,
        q1: mean - 0.7 * sd,
        median: mean,
        q3: mean + 0.7 * sd,
        p90: mean + 1.3 * sd,
        maximum: mean + 2.0 * sd,
    }
}

fn table() -> ReferenceTable {
    ReferenceTable::new(
        "6-7 ans",
        vec![
            row(STOCK_LEXICAL, 50.0, 10.0),
            row(DISCRIMINATION_PHONOLOGIQUE, 20.0, 0.0),
            row(MOTS_OUTILS, 12.0, 3.0),
            row(INHIB_V_CONG_TEMPS, 450.0, 100.0),
            row(INHIB_V_INCONG_TEMPS, 600.0, 120.0),
            row(INHIB_V_INTERF_TEMPS, 100.0, 50.0),
            row(INHIB_NV_INTERF_SCORE, 2.0, 1.0),
        ],
    )
    .unwrap()
}

fn score(table: &ReferenceTable, scores: &[RawScore], policy: InterferencePolicy) -> super::ScoringOutcome {
    score_request(&ScoringRequest {
        child_id: "E01",
        table,
        scores,
        rejected: &[],
        policy,
    })
}

#[test]
fn test_single_task_z_and_percentile() {
    let table = table();
    let out = score(&table, &[RawScore::new(STOCK_LEXICAL, 65.0)], InterferencePolicy::MissingAsZero);
    assert_eq!(out.results.len(), 1);
    let r = &out.results[0];
    assert_eq!(r.task, STOCK_LEXICAL);
    assert_eq!(r.category, Category::Langage);
    assert_eq!(r.origin, ScoreOrigin::Entered);
    assert_eq!(r.z_score, 1.5);
    assert!((r.percentile - 93.319_279_873_114_19).abs() < 1e-9);
    assert_eq!(r.band, Some(PercentileBand::High));
    assert_eq!(r.reference.mean, 50.0);
    assert_eq!(out.age_group, "6-7 ans");
}

#[test]
fn test_zero_sd_and_unentered_tasks_are_excluded() {
    let table = table();
    let out = score(
        &table,
        &[
            RawScore::new(DISCRIMINATION_PHONOLOGIQUE, 18.0),
            RawScore::new(MOTS_OUTILS, 12.0),
        ],
        InterferencePolicy::RequireBoth,
    );
    let tasks: Vec<&str> = out.results.iter().map(|r| r.task.as_str()).collect();
    assert_eq!(tasks, vec![MOTS_OUTILS]);
    assert_eq!(out.results[0].percentile, 50.0);
}

#[test]
fn test_duplicates_first_wins_and_table_order() {
    let table = table();
    let out = score(
        &table,
        &[
            RawScore::new(MOTS_OUTILS, 15.0),
            RawScore::new(STOCK_LEXICAL, 40.0),
            RawScore::new(MOTS_OUTILS, 3.0),
        ],
        InterferencePolicy::RequireBoth,
    );
    let tasks: Vec<&str> = out.results.iter().map(|r| r.task.as_str()).collect();
    assert_eq!(tasks, vec![STOCK_LEXICAL, MOTS_OUTILS]);
    assert_eq!(out.results[1].score, 15.0);
    assert_eq!(out.results[1].z_score, 1.0);
}

#[test]
fn test_interference_is_derived_and_scored() {
    let table = table();
    let out = score(
        &table,
        &[
            RawScore::new(INHIB_V_CONG_TEMPS, 500.0),
            RawScore::new(INHIB_V_INCONG_TEMPS, 620.0),
        ],
        InterferencePolicy::MissingAsZero,
    );
    let interf = out
        .results
        .iter()
        .find(|r| r.task == INHIB_V_INTERF_TEMPS)
        .unwrap();
    assert_eq!(interf.score, 120.0);
    assert_eq!(interf.origin, ScoreOrigin::Interference);
    assert!((interf.z_score - 0.4).abs() < 1e-12);
    assert_eq!(out.interference.len(), 4);
    assert_eq!(out.results.len(), 3);
}

#[test]
fn test_entered_interference_shadows_derived() {
    let table = table();
    let out = score(
        &table,
        &[
            RawScore::new(INHIB_V_INTERF_TEMPS, 150.0),
            RawScore::new(INHIB_V_CONG_TEMPS, 500.0),
            RawScore::new(INHIB_V_INCONG_TEMPS, 620.0),
        ],
        InterferencePolicy::MissingAsZero,
    );
    let interf = out
        .results
        .iter()
        .find(|r| r.task == INHIB_V_INTERF_TEMPS)
        .unwrap();
    assert_eq!(interf.score, 150.0);
    assert_eq!(interf.origin, ScoreOrigin::Entered);
}

#[test]
fn test_missing_operand_policies() {
    let table = table();
    let lone = [RawScore::new(INHIB_V_INCONG_TEMPS, 620.0)];

    let legacy = score(&table, &lone, InterferencePolicy::MissingAsZero);
    let interf = legacy
        .results
        .iter()
        .find(|r| r.task == INHIB_V_INTERF_TEMPS)
        .unwrap();
    assert_eq!(interf.score, 620.0);
    assert!(legacy.warnings.iter().any(|w| w.contains("compté comme 0")));

    let strict = score(&table, &lone, InterferencePolicy::RequireBoth);
    assert!(strict.results.iter().all(|r| r.task != INHIB_V_INTERF_TEMPS));
}

#[test]
fn test_zero_interference_not_scored() {
    let table = table();
    let out = score(
        &table,
        &[
            RawScore::new(INHIB_NV_CONG_SCORE, 8.0),
            RawScore::new(INHIB_NV_INCONG_SCORE, 8.0),
        ],
        InterferencePolicy::RequireBoth,
    );
    let value = out
        .interference
        .iter()
        .find(|v| v.task == INHIB_NV_INTERF_SCORE)
        .unwrap();
    assert_eq!(value.value, Some(0.0));
    assert!(table.contains(INHIB_NV_INTERF_SCORE));
    assert!(out.results.iter().all(|r| r.task != INHIB_NV_INTERF_SCORE));
}

#[test]
fn test_stage1_lists_tasks_without_norms() {
    let table = table();
    let out = run_stage1(
        &table,
        &[RawScore::new(STOCK_LEXICAL, 1.0), RawScore::new("Lecture de mots", 3.0)],
    );
    assert_eq!(out.accepted.len(), 1);
    assert!(out.without_norms.iter().any(|t| t == DECISION_LEXICALE_AUDITIVE));
    assert_eq!(out.without_norms.last().map(String::as_str), Some("Lecture de mots"));
    assert!(!out.without_norms.iter().any(|t| t == STOCK_LEXICAL));
}

#[test]
fn test_rejected_entries_become_warnings() {
    let table = table();
    let rejected = [RejectedEntry {
        line: Some(3),
        task: STOCK_LEXICAL.to_string(),
        value: "abc".to_string(),
        reason: "invalid value 'abc' for 'Stock Lexical': enter a number".to_string(),
    }];
    let out = score_request(&ScoringRequest {
        child_id: "E01",
        table: &table,
        scores: &[],
        rejected: &rejected,
        policy: InterferencePolicy::RequireBoth,
    });
    assert_eq!(out.rejected.len(), 1);
    assert!(out.warnings.iter().any(|w| w.contains("'abc'")));
}

#[test]
fn test_chart_selection() {
    let table = table();
    let out = score(
        &table,
        &[RawScore::new(STOCK_LEXICAL, 65.0), RawScore::new(MOTS_OUTILS, 9.0)],
        InterferencePolicy::RequireBoth,
    );
    let all = select_chart_results(&out.results, None);
    assert_eq!(all.results.len(), 2);

    let wanted = vec![MOTS_OUTILS.to_string(), "Inconnue".to_string()];
    let some = select_chart_results(&out.results, Some(&wanted));
    assert_eq!(some.results.len(), 1);
    assert_eq!(some.results[0].task, MOTS_OUTILS);
    assert_eq!(some.unknown, vec!["Inconnue".to_string()]);
}

#[test]
fn test_write_bundle_files() {
    let table = table();
    let out = score(
        &table,
        &[RawScore::new(STOCK_LEXICAL, 65.0), RawScore::new(MOTS_OUTILS, 9.0)],
        InterferencePolicy::MissingAsZero,
    );
    let dir = TempDir::new().unwrap();
    let paths = write_bundle(&out, dir.path(), None).unwrap();

    assert_eq!(paths.dir, dir.path().join("E01_Resultats_Comprendre"));
    assert_eq!(paths.archive, dir.path().join("E01_Resultats_Comprendre.zip"));
    assert!(paths.workbook.ends_with("E01_Tableau_Comprendre.xlsx"));

    let tsv = std::fs::read_to_string(&paths.table).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Tâche\tCatégorie\tMoyenne"));
    assert!(lines[1].starts_with("Stock Lexical\tLangage\t50\t10\t"));

    let svg = std::fs::read_to_string(paths.chart_svg.as_ref().unwrap()).unwrap();
    assert!(svg.contains("<svg"));
    if let Some(png) = &paths.chart_png {
        let bytes = std::fs::read(png).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.summary).unwrap()).unwrap();
    assert_eq!(json["child_id"], "E01");
    assert_eq!(json["n_scored"], 2);
    assert_eq!(json["results"][0]["category"], "Langage");
    assert_eq!(json["interference_policy"], "missing-as-zero");
    assert_eq!(json["tool"]["name"], "comprendre-scoring");
    assert_eq!(json["tool"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["tool"].get("git_hash").is_none());

    let report = std::fs::read_to_string(&paths.report).unwrap();
    assert!(report.contains("[Langage]"));

    let archive = zip::ZipArchive::new(std::fs::File::open(&paths.archive).unwrap()).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for expected in [
        "E01_Tableau_Comprendre.xlsx",
        "E01_Graphique_Comprendre.svg",
        "E01_Tableau_Comprendre.tsv",
        "summary.json",
        "report.txt",
    ] {
        assert!(names.contains(&expected), "{expected} missing from {names:?}");
    }
    assert_eq!(names.len(), 5 + usize::from(paths.chart_png.is_some()));
}

#[test]
fn test_write_bundle_without_chart_rows() {
    let table = table();
    let out = score(&table, &[RawScore::new(STOCK_LEXICAL, 65.0)], InterferencePolicy::RequireBoth);
    let dir = TempDir::new().unwrap();
    let wanted = vec!["Inconnue".to_string()];
    let paths = write_bundle(&out, dir.path(), Some(&wanted)).unwrap();
    assert!(paths.chart_svg.is_none());
    assert!(paths.chart_png.is_none());
    assert!(paths.table.exists());
    assert!(paths.workbook.exists());
    assert!(paths.archive.exists());
}
