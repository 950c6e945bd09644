pub mod audit;
pub mod defs;
pub mod mapping;

pub use defs::{Category, EntryGroup, TaskDef};

/// Result of checking one reference table against the static task catalog.
#[derive(Debug, Clone)]
pub struct CatalogAudit {
    pub age_group: String,
    pub n_tasks_defined: usize,
    pub n_tasks_normed: usize,
    /// Table tasks the catalog does not know; they score under `Autre`.
    pub unmapped: Vec<String>,
    /// Entry-form tasks the table has no norm for.
    pub without_norms: Vec<&'static str>,
}

impl CatalogAudit {
    pub fn is_clean(&self) -> bool {
        self.unmapped.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/tasks/tests.rs"]
mod tests;
