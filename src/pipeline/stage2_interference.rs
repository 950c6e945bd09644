use crate::input::RawScore;
use crate::model::interference::{InterferencePolicy, InterferenceValue, derive_interference};

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub values: Vec<InterferenceValue>,
    /// Non-zero derived values, in pair order.
    pub derived: Vec<RawScore>,
}

/// Operands are read from every entered score, normed or not.
pub fn run_stage2(scores: &[RawScore], policy: InterferencePolicy) -> Stage2Output {
    let values = derive_interference(scores, policy);
    let derived = values.iter().filter_map(InterferenceValue::as_score).collect();
    Stage2Output { values, derived }
}
