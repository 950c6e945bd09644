use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::input::ReferenceTable;
use crate::input::scores::{RawScore, parse_score_entry};
use crate::tasks::defs::entry_groups;

#[derive(Debug, Clone, Default)]
pub struct GuidedEntry {
    pub scores: Vec<RawScore>,
    pub without_norms: Vec<String>,
    /// Invalid answers that were asked again.
    pub retries: usize,
    /// Input ended before every task was offered.
    pub interrupted: bool,
}

/// Walks the entry form on a line-oriented terminal.
///
/// Tasks without a reference row are announced and skipped. A blank answer
/// leaves the task unentered; an answer that is not a number is refused and
/// asked again. End of input closes the form early.
pub fn run_guided_entry<R: BufRead, W: Write>(
    table: &ReferenceTable,
    mut input: R,
    mut output: W,
) -> io::Result<GuidedEntry> {
    let mut entry = GuidedEntry::default();
    let mut line = String::new();

    'groups: for group in entry_groups() {
        writeln!(output, "\n== {} ==", group.title)?;
        for &(left, right) in group.pairs {
            for task in [left, right] {
                if !table.contains(task) {
                    writeln!(output, "Pas de normes disponibles pour {task}")?;
                    entry.without_norms.push(task.to_string());
                    continue;
                }
                loop {
                    write!(output, "{task} : ")?;
                    output.flush()?;
                    line.clear();
                    if input.read_line(&mut line)? == 0 {
                        writeln!(output)?;
                        entry.interrupted = true;
                        break 'groups;
                    }
                    match parse_score_entry(task, &line) {
                        Ok(Some(score)) => {
                            debug!(task, value = score.value, "score entered");
                            entry.scores.push(score);
                            break;
                        }
                        Ok(None) => break,
                        Err(err) => {
                            entry.retries += 1;
                            writeln!(output, "Valeur non valide pour {task}. Veuillez entrer un nombre.")?;
                            debug!(task, "{err}");
                        }
                    }
                }
            }
        }
    }

    if entry.interrupted {
        warn!(
            entered = entry.scores.len(),
            "input closed before the end of the form; remaining tasks left blank"
        );
    }
    Ok(entry)
}
