pub mod criteria;
pub mod engine;

pub use criteria::{Criterion, CONVERSION_THRESHOLD, CRITERIA};
pub use engine::{compute_score, score_breakdown, CriterionContribution, ScoreResult};
