use serde::Serialize;

use crate::input::ReferenceRow;
use crate::model::bands::PercentileBand;
use crate::tasks::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrigin {
    Entered,
    Interference,
}

/// One task scored against its age-group norm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub task: String,
    pub category: Category,
    pub origin: ScoreOrigin,
    pub score: f64,
    pub z_score: f64,
    pub percentile: f64,
    pub band: Option<PercentileBand>,
    pub reference: ReferenceRow,
}
