use std::collections::HashMap;
use std::sync::OnceLock;

use crate::tasks::defs::{Category, TaskDef, builtin_tasks};

fn task_index() -> &'static HashMap<&'static str, &'static TaskDef> {
    static INDEX: OnceLock<HashMap<&'static str, &'static TaskDef>> = OnceLock::new();
    INDEX.get_or_init(|| builtin_tasks().iter().map(|t| (t.name, t)).collect())
}

pub fn task_def(name: &str) -> Option<&'static TaskDef> {
    task_index().get(name.trim()).copied()
}

pub fn category_of(name: &str) -> Category {
    task_def(name).map_or(Category::Autre, |t| t.category)
}

pub fn short_label(name: &str) -> String {
    match task_def(name) {
        Some(def) => def.short_label.to_string(),
        None => name.trim().to_string(),
    }
}
