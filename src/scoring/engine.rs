use super::criteria::{Criterion, CRITERIA, CONVERSION_THRESHOLD};
use crate::model::Scores;

#[derive(Debug, Clone, PartialEq)]
pub struct CriterionContribution {
    pub label: &'static str,
    pub submitted: Option<i32>, // Raw value as stored, before clamping
    pub value: i32,             // Clamped value used for weighting
    pub weight: f64,
    pub points: f64,            // Share of the 0-100 total
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: u32,
    pub contributions: Vec<CriterionContribution>,
}

impl ScoreResult {
    pub fn is_convertible(&self) -> bool {
        self.score >= CONVERSION_THRESHOLD
    }
}

/// Priority score in [0,100] for a set of submitted scores.
///
/// Missing scores yield 0. Rounds half away from zero.
pub fn compute_score(scores: Option<&Scores>) -> u32 {
    score_breakdown(scores).score
}

/// Same as [`compute_score`] but keeps the per-criterion contributions.
pub fn score_breakdown(scores: Option<&Scores>) -> ScoreResult {
    let Some(scores) = scores else {
        return ScoreResult {
            score: 0,
            contributions: Vec::new(),
        };
    };

    let contributions: Vec<_> = CRITERIA
        .iter()
        .map(|criterion| contribution(criterion, scores))
        .collect();

    let total: f64 = contributions.iter().map(|c| c.points).sum();

    ScoreResult {
        score: total.round().clamp(0.0, 100.0) as u32,
        contributions,
    }
}

fn contribution(criterion: &Criterion, scores: &Scores) -> CriterionContribution {
    let submitted = criterion.value(scores);
    let value = submitted.unwrap_or(0).clamp(0, criterion.max);

    // Whole-percent weights keep each term a multiple of 0.5 and the sum exact.
    let weight_pct = (criterion.weight * 100.0).round();
    let points = f64::from(value) * weight_pct / f64::from(criterion.max);

    CriterionContribution {
        label: criterion.label,
        submitted,
        value,
        weight: criterion.weight,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_scores_yield_zero() {
        assert_eq!(compute_score(None), 0);
        assert!(score_breakdown(None).contributions.is_empty());
    }

    #[test]
    fn test_all_max_yields_hundred() {
        assert_eq!(compute_score(Some(&Scores::new(10, 10, 10, 10, 10))), 100);
    }

    #[test]
    fn test_all_zero_yields_zero() {
        assert_eq!(compute_score(Some(&Scores::new(0, 0, 0, 0, 0))), 0);
    }

    #[test]
    fn test_half_point_rounds_up() {
        // 20 + 17.5 + 12 + 7.5 + 10.5 = 67.5
        assert_eq!(compute_score(Some(&Scores::new(8, 7, 6, 5, 7))), 68);
    }

    #[test]
    fn test_seed_idea_scores() {
        assert_eq!(compute_score(Some(&Scores::new(9, 8, 8, 7, 8))), 81);
        assert_eq!(compute_score(Some(&Scores::new(7, 6, 7, 6, 8))), 68);
        assert_eq!(compute_score(Some(&Scores::new(8, 8, 7, 7, 7))), 75);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let high = Scores::new(15, 10, 10, 10, 10);
        let max = Scores::new(10, 10, 10, 10, 10);
        assert_eq!(compute_score(Some(&high)), compute_score(Some(&max)));

        let low = Scores::new(-3, 5, 5, 5, 5);
        let zero = Scores::new(0, 5, 5, 5, 5);
        assert_eq!(compute_score(Some(&low)), compute_score(Some(&zero)));
    }

    #[test]
    fn test_missing_criterion_counts_as_zero() {
        let sparse = Scores {
            feasibility: Some(10),
            ..Scores::default()
        };
        assert_eq!(compute_score(Some(&sparse)), 20);
    }

    #[test]
    fn test_breakdown_keeps_submitted_and_clamped_values() {
        let result = score_breakdown(Some(&Scores::new(12, 7, 6, 5, 7)));
        let first = &result.contributions[0];
        assert_eq!(first.label, "Strategic Alignment");
        assert_eq!(first.submitted, Some(12));
        assert_eq!(first.value, 10);
        assert_eq!(first.points, 25.0);
        assert_eq!(result.contributions.len(), 5);
    }

    #[test]
    fn test_conversion_threshold() {
        assert!(score_breakdown(Some(&Scores::new(8, 8, 7, 7, 7))).is_convertible());
        assert!(!score_breakdown(Some(&Scores::new(8, 7, 6, 5, 7))).is_convertible());
    }
}
