use crate::model::result::{ScoreOrigin, ScoredResult};
use crate::pipeline::ScoringOutcome;
use crate::report::{band_counts, by_category, format_trimmed};

pub fn render_report_text(outcome: &ScoringOutcome) -> String {
    let mut out = String::new();

    out.push_str("Résultats Batterie Comprendre\n");
    out.push_str("=============================\n\n");
    out.push_str(&format!("ID enfant: {}\n", outcome.child_id));
    out.push_str(&format!("Groupe d'âge: {}\n", outcome.age_group));
    out.push_str(&format!(
        "Interférences: {}\n",
        outcome.policy.label()
    ));
    out.push_str(&format!("Tâches calculées: {}\n\n", outcome.results.len()));

    out.push_str("1. Résultats par catégorie\n");
    let refs: Vec<&ScoredResult> = outcome.results.iter().collect();
    let groups = by_category(&refs);
    if groups.is_empty() {
        out.push_str("Aucune tâche calculée.\n");
    }
    for (category, rows) in groups {
        out.push_str(&format!("\n[{}]\n", category.label()));
        for r in rows {
            out.push_str(&format_result_line(r));
            out.push('\n');
        }
    }
    out.push('\n');

    out.push_str("2. Répartition par percentile\n");
    for stat in band_counts(&outcome.results) {
        out.push_str(&format!("{:>7}: {}\n", stat.band.label(), stat.count));
    }
    out.push('\n');

    out.push_str("3. Scores d'interférence\n");
    for value in &outcome.interference {
        match value.value {
            Some(v) => out.push_str(&format!("{}: {:.2}\n", value.task, v)),
            None => out.push_str(&format!("{}: non calculé\n", value.task)),
        }
    }
    out.push('\n');

    out.push_str("4. Remarques\n");
    if outcome.warnings.is_empty() {
        out.push_str("Aucune.\n");
    }
    for w in &outcome.warnings {
        out.push_str(&format!("- {w}\n"));
    }

    out
}

fn format_result_line(r: &ScoredResult) -> String {
    let band = r.band.map(|b| b.label()).unwrap_or("-");
    let marker = match r.origin {
        ScoreOrigin::Entered => "",
        ScoreOrigin::Interference => " (calculé)",
    };
    format!(
        "{}{}: score {} | moyenne {} | écart-type {} | z {} | percentile {} [{}]",
        r.task,
        marker,
        format_trimmed(r.score),
        format_trimmed(r.reference.mean),
        format_trimmed(r.reference.sd),
        format_trimmed(r.z_score),
        format_trimmed(r.percentile),
        band
    )
}
