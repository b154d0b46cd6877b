use crate::model::Scores;

/// One prioritization criterion: its weight in the total and its scale.
#[derive(Debug, Clone, Copy)]
pub struct Criterion {
    pub key: &'static str,
    pub label: &'static str,
    pub weight: f64,
    pub max: i32,
    read: fn(&Scores) -> Option<i32>,
}

impl Criterion {
    /// Submitted value for this criterion, `None` when absent.
    pub fn value(&self, scores: &Scores) -> Option<i32> {
        (self.read)(scores)
    }
}

/// Weight table for idea prioritization. Weights sum to 1.0.
pub const CRITERIA: [Criterion; 5] = [
    Criterion {
        key: "strategicAlignment",
        label: "Strategic Alignment",
        weight: 0.25,
        max: 10,
        read: |s| s.strategic_alignment,
    },
    Criterion {
        key: "financialImpact",
        label: "Financial Impact",
        weight: 0.25,
        max: 10,
        read: |s| s.financial_impact,
    },
    Criterion {
        key: "feasibility",
        label: "Feasibility",
        weight: 0.20,
        max: 10,
        read: |s| s.feasibility,
    },
    Criterion {
        key: "timeToValue",
        label: "Time to Value",
        weight: 0.15,
        max: 10,
        read: |s| s.time_to_value,
    },
    Criterion {
        key: "riskLevel",
        label: "Risk Level (inverse)",
        weight: 0.15,
        max: 10,
        read: |s| s.risk_level,
    },
];

/// Minimum priority score an idea needs before it can become a project.
pub const CONVERSION_THRESHOLD: u32 = 70;
