use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::input::RawScore;
use crate::tasks::defs::{
    INHIB_NV_CONG_SCORE, INHIB_NV_CONG_TEMPS, INHIB_NV_INCONG_SCORE, INHIB_NV_INCONG_TEMPS,
    INHIB_NV_INTERF_SCORE, INHIB_NV_INTERF_TEMPS, INHIB_V_CONG_SCORE, INHIB_V_CONG_TEMPS,
    INHIB_V_INCONG_SCORE, INHIB_V_INCONG_TEMPS, INHIB_V_INTERF_SCORE, INHIB_V_INTERF_TEMPS,
};

#[derive(Debug, Clone, Copy)]
pub struct InterferencePair {
    pub task: &'static str,
    pub congruent: &'static str,
    pub incongruent: &'static str,
}

pub const INTERFERENCE_PAIRS: [InterferencePair; 4] = [
    InterferencePair {
        task: INHIB_V_INTERF_SCORE,
        congruent: INHIB_V_CONG_SCORE,
        incongruent: INHIB_V_INCONG_SCORE,
    },
    InterferencePair {
        task: INHIB_NV_INTERF_SCORE,
        congruent: INHIB_NV_CONG_SCORE,
        incongruent: INHIB_NV_INCONG_SCORE,
    },
    InterferencePair {
        task: INHIB_V_INTERF_TEMPS,
        congruent: INHIB_V_CONG_TEMPS,
        incongruent: INHIB_V_INCONG_TEMPS,
    },
    InterferencePair {
        task: INHIB_NV_INTERF_TEMPS,
        congruent: INHIB_NV_CONG_TEMPS,
        incongruent: INHIB_NV_INCONG_TEMPS,
    },
];

/// How a missing congruent or incongruent operand is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterferencePolicy {
    /// A missing operand counts as 0.
    #[default]
    MissingAsZero,
    /// No interference is derived unless both operands were entered.
    RequireBoth,
}

impl InterferencePolicy {
    pub fn label(self) -> &'static str {
        match self {
            InterferencePolicy::MissingAsZero => "missing-as-zero",
            InterferencePolicy::RequireBoth => "require-both",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterferenceValue {
    pub task: &'static str,
    pub value: Option<f64>,
    /// Operands replaced by 0 to produce `value`.
    pub substituted: Vec<&'static str>,
}

impl InterferenceValue {
    /// Kept for scoring only when derived and non-zero.
    pub fn as_score(&self) -> Option<RawScore> {
        match self.value {
            Some(v) if v != 0.0 => Some(RawScore::new(self.task, v)),
            _ => None,
        }
    }
}

/// Derives the four interference values; the first entry of an operand wins.
pub fn derive_interference(
    scores: &[RawScore],
    policy: InterferencePolicy,
) -> Vec<InterferenceValue> {
    let mut first: HashMap<&str, f64> = HashMap::new();
    for s in scores {
        first.entry(s.task.as_str()).or_insert(s.value);
    }

    INTERFERENCE_PAIRS
        .iter()
        .map(|pair| {
            let congruent = first.get(pair.congruent).copied();
            let incongruent = first.get(pair.incongruent).copied();
            match (congruent, incongruent, policy) {
                (Some(c), Some(i), _) => InterferenceValue {
                    task: pair.task,
                    value: Some(i - c),
                    substituted: Vec::new(),
                },
                (None, None, InterferencePolicy::MissingAsZero) => InterferenceValue {
                    task: pair.task,
                    value: Some(0.0),
                    substituted: vec![pair.congruent, pair.incongruent],
                },
                (c, i, InterferencePolicy::MissingAsZero) => {
                    let missing = if c.is_none() {
                        pair.congruent
                    } else {
                        pair.incongruent
                    };
                    warn!(
                        task = pair.task,
                        missing, "interference operand missing; counted as 0"
                    );
                    InterferenceValue {
                        task: pair.task,
                        value: Some(i.unwrap_or(0.0) - c.unwrap_or(0.0)),
                        substituted: vec![missing],
                    }
                }
                (_, _, InterferencePolicy::RequireBoth) => InterferenceValue {
                    task: pair.task,
                    value: None,
                    substituted: Vec::new(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/interference.rs"]
mod tests;
