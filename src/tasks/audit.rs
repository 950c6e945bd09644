use tracing::{debug, warn};

use crate::input::ReferenceTable;
use crate::tasks::CatalogAudit;
use crate::tasks::defs::{builtin_tasks, entry_tasks};
use crate::tasks::mapping::task_def;

pub fn audit_table(table: &ReferenceTable) -> CatalogAudit {
    let mut unmapped = Vec::new();
    for row in table.rows() {
        if task_def(&row.task).is_none() {
            unmapped.push(row.task.clone());
        }
    }

    let without_norms: Vec<&'static str> = entry_tasks().filter(|t| !table.contains(t)).collect();

    let n_tasks_normed = builtin_tasks()
        .iter()
        .filter(|t| table.contains(t.name))
        .count();

    for task in &unmapped {
        warn!(
            age_group = %table.age_group(),
            task = %task,
            "reference task is not in the catalog; scored under 'Autre'"
        );
    }
    debug!(
        age_group = %table.age_group(),
        normed = n_tasks_normed,
        without_norms = without_norms.len(),
        "catalog audit finished"
    );

    CatalogAudit {
        age_group: table.age_group().to_string(),
        n_tasks_defined: builtin_tasks().len(),
        n_tasks_normed,
        unmapped,
        without_norms,
    }
}
