use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{Category, IdeaStatus, ProjectStatus, Record};

/// Filter values as typed by a user or written in the config file.
///
/// Everything is a string so that a bad value can be dropped with a warning
/// instead of failing the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub min_benefit: Option<String>,
    #[serde(default)]
    pub max_benefit: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl RawFilter {
    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: RawFilter) -> RawFilter {
        RawFilter {
            category: self.category.or(fallback.category),
            status: self.status.or(fallback.status),
            portfolio: self.portfolio.or(fallback.portfolio),
            min_benefit: self.min_benefit.or(fallback.min_benefit),
            max_benefit: self.max_benefit.or(fallback.max_benefit),
            search: self.search.or(fallback.search),
        }
    }
}

/// Conjunction of optional constraints. An unset field does not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    /// Lifecycle status label, matched exactly.
    pub status: Option<String>,
    pub portfolio_id: Option<u64>,
    pub min_benefit: Option<f64>,
    pub max_benefit: Option<f64>,
    /// Case-insensitive substring of the name, or of a project's PM.
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw strings, dropping values that do not parse.
    pub fn from_raw(raw: &RawFilter) -> Self {
        let category = raw.category.as_deref().and_then(|s| {
            s.parse::<Category>()
                .map_err(|e| warn!("Ignoring category filter: {}", e))
                .ok()
        });

        let status = raw
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(canonical_status);

        let portfolio_id = raw
            .portfolio
            .as_deref()
            .and_then(|s| parse_number::<u64>("portfolio", s));

        let min_benefit = raw
            .min_benefit
            .as_deref()
            .and_then(|s| parse_number::<f64>("min benefit", s))
            .filter(|v| v.is_finite());

        let max_benefit = raw
            .max_benefit
            .as_deref()
            .and_then(|s| parse_number::<f64>("max benefit", s))
            .filter(|v| v.is_finite());

        let search = raw
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            category,
            status,
            portfolio_id,
            min_benefit,
            max_benefit,
            search,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check a single record against every set constraint.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        passes_category(record, self.category)
            && passes_status(record, self.status.as_deref())
            && passes_portfolio(record, self.portfolio_id)
            && passes_benefit_range(record, self.min_benefit, self.max_benefit)
            && passes_search(record, self.search.as_deref())
    }
}

/// Spell a typed status the way records label it ("under-review" becomes
/// "Under Review"). Text that names no known status is kept as typed.
fn canonical_status(s: &str) -> String {
    s.parse::<ProjectStatus>()
        .map(|status| status.label())
        .or_else(|_| s.parse::<IdeaStatus>().map(|status| status.label()))
        .map_or_else(|_| s.to_string(), str::to_string)
}

fn parse_number<T: std::str::FromStr>(name: &str, s: &str) -> Option<T> {
    let cleaned: String = s.trim().chars().filter(|c| !matches!(c, ',' | '_' | '$')).collect();
    match cleaned.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {} filter: '{}' is not a number", name, s.trim());
            None
        }
    }
}

/// Keep records matching `criteria`, preserving input order.
///
/// Pure: returns a new collection of references.
pub fn filter_records<'a, R, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a R>
where
    R: Record + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|record| criteria.matches(*record))
        .collect()
}

pub fn passes_category<R: Record + ?Sized>(record: &R, category: Option<Category>) -> bool {
    category.map_or(true, |c| record.category() == c)
}

/// Exact match against the record's status label.
pub fn passes_status<R: Record + ?Sized>(record: &R, status: Option<&str>) -> bool {
    status.map_or(true, |s| record.status_label() == s)
}

/// A record without a portfolio never matches a portfolio constraint.
pub fn passes_portfolio<R: Record + ?Sized>(record: &R, portfolio_id: Option<u64>) -> bool {
    match portfolio_id {
        None => true,
        Some(id) => record.portfolio_id() == Some(id),
    }
}

/// Inclusive bounds on the benefit projection. Records with no benefit
/// projection (ideas) are not constrained.
pub fn passes_benefit_range<R: Record + ?Sized>(
    record: &R,
    min: Option<f64>,
    max: Option<f64>,
) -> bool {
    let Some(benefit) = record.benefit_projection() else {
        return true;
    };
    min.map_or(true, |m| benefit >= m) && max.map_or(true, |m| benefit <= m)
}

pub fn passes_search<R: Record + ?Sized>(record: &R, search: Option<&str>) -> bool {
    let Some(needle) = search else {
        return true;
    };
    let needle = needle.to_lowercase();
    record.display_name().to_lowercase().contains(&needle)
        || record
            .owner_name()
            .is_some_and(|owner| owner.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinanceApproval, Health, Idea, IdeaStatus, Project, ProjectStatus, Risk};
    use chrono::Utc;

    fn project(id: u64, name: &str, category: Category, benefit: f64) -> Project {
        Project {
            id,
            name: name.to_string(),
            pm: "Sarah Chen".to_string(),
            category,
            portfolio_id: Some(1),
            benefit_projection: benefit,
            actual_benefit: 0.0,
            progress: 0,
            project_status: ProjectStatus::Execution,
            finance_approval: FinanceApproval::Approved,
            health: Health::Green,
            risk: Risk::Low,
            comments: vec![],
            last_updated: Utc::now(),
        }
    }

    fn idea(id: u64, title: &str) -> Idea {
        Idea {
            id,
            title: title.to_string(),
            description: String::new(),
            submitter: "Amy Liu".to_string(),
            votes: 0,
            status: IdeaStatus::UnderReview,
            category: Category::Production,
            portfolio_id: None,
            scores: None,
            priority_score: None,
            comments: vec![],
            last_updated: Utc::now(),
        }
    }

    fn ids<R: Record>(records: &[&R]) -> Vec<u64> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything_in_order() {
        let projects = vec![
            project(3, "C", Category::Esg, 1.0),
            project(1, "A", Category::CapEx, 2.0),
            project(2, "B", Category::Esg, 3.0),
        ];
        let result = filter_records(&projects, &FilterCriteria::default());
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn test_category_filter() {
        let projects = vec![
            project(1, "A", Category::Esg, 1.0),
            project(2, "B", Category::CapEx, 2.0),
            project(3, "C", Category::Esg, 3.0),
        ];
        let criteria = FilterCriteria {
            category: Some(Category::Esg),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&projects, &criteria)), vec![1, 3]);
    }

    #[test]
    fn test_status_filter_is_exact() {
        let mut planning = project(2, "B", Category::Esg, 1.0);
        planning.project_status = ProjectStatus::FeasibilityAssessment;
        let projects = vec![project(1, "A", Category::Esg, 1.0), planning];

        let exact = FilterCriteria {
            status: Some("Feasibility Assessment".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&projects, &exact)), vec![2]);

        let lowercase = FilterCriteria {
            status: Some("feasibility assessment".to_string()),
            ..Default::default()
        };
        assert!(filter_records(&projects, &lowercase).is_empty());
    }

    #[test]
    fn test_from_raw_spells_status_as_labelled() {
        let status_of = |typed: &str| {
            FilterCriteria::from_raw(&RawFilter {
                status: Some(typed.to_string()),
                ..Default::default()
            })
            .status
        };
        assert_eq!(status_of("feasibility assessment").as_deref(), Some("Feasibility Assessment"));
        assert_eq!(status_of("under-review").as_deref(), Some("Under Review"));
        assert_eq!(status_of("Paused").as_deref(), Some("Paused"));

        let mut planning = project(2, "B", Category::Esg, 1.0);
        planning.project_status = ProjectStatus::FeasibilityAssessment;
        let projects = vec![project(1, "A", Category::Esg, 1.0), planning];
        let criteria = FilterCriteria::from_raw(&RawFilter {
            status: Some("FEASIBILITY_ASSESSMENT".to_string()),
            ..Default::default()
        });
        assert_eq!(ids(&filter_records(&projects, &criteria)), vec![2]);
    }

    #[test]
    fn test_portfolio_filter_skips_unassigned() {
        let mut unassigned = project(2, "B", Category::Esg, 1.0);
        unassigned.portfolio_id = None;
        let projects = vec![project(1, "A", Category::Esg, 1.0), unassigned];
        let criteria = FilterCriteria {
            portfolio_id: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&projects, &criteria)), vec![1]);
    }

    #[test]
    fn test_benefit_range_is_inclusive() {
        let projects = vec![
            project(1, "A", Category::Esg, 1_000_000.0),
            project(2, "B", Category::Esg, 2_000_000.0),
            project(3, "C", Category::Esg, 3_000_000.0),
        ];
        let criteria = FilterCriteria {
            min_benefit: Some(1_000_000.0),
            max_benefit: Some(2_000_000.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&projects, &criteria)), vec![1, 2]);
    }

    #[test]
    fn test_benefit_range_does_not_constrain_ideas() {
        let ideas = vec![idea(1, "Ammonia Cracking"), idea(2, "Predictive Maintenance")];
        let criteria = FilterCriteria {
            min_benefit: Some(1_000_000_000.0),
            max_benefit: Some(1.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&ideas, &criteria)), vec![1, 2]);
    }

    #[test]
    fn test_search_matches_name_or_pm() {
        let mut by_pm = project(2, "Tank Fleet", Category::Distribution, 1.0);
        by_pm.pm = "David Kim".to_string();
        let projects = vec![project(1, "Hydrogen Plant", Category::CapEx, 1.0), by_pm];

        let by_name = FilterCriteria {
            search: Some("HYDROGEN".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&projects, &by_name)), vec![1]);

        let by_owner = FilterCriteria {
            search: Some("kim".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&projects, &by_owner)), vec![2]);
    }

    #[test]
    fn test_search_on_ideas_uses_title_only() {
        let ideas = vec![idea(1, "Ammonia Cracking")];
        let criteria = FilterCriteria {
            search: Some("amy".to_string()),
            ..Default::default()
        };
        assert!(filter_records(&ideas, &criteria).is_empty());
    }

    #[test]
    fn test_from_raw_parses_valid_values() {
        let raw = RawFilter {
            category: Some("esg".to_string()),
            status: Some(" Execution ".to_string()),
            portfolio: Some("2".to_string()),
            min_benefit: Some("$1,000,000".to_string()),
            max_benefit: Some("5000000".to_string()),
            search: Some("  co2 ".to_string()),
        };
        let criteria = FilterCriteria::from_raw(&raw);
        assert_eq!(criteria.category, Some(Category::Esg));
        assert_eq!(criteria.status.as_deref(), Some("Execution"));
        assert_eq!(criteria.portfolio_id, Some(2));
        assert_eq!(criteria.min_benefit, Some(1_000_000.0));
        assert_eq!(criteria.max_benefit, Some(5_000_000.0));
        assert_eq!(criteria.search.as_deref(), Some("co2"));
    }

    #[test]
    fn test_from_raw_drops_unparseable_values() {
        let raw = RawFilter {
            category: Some("Aerospace".to_string()),
            portfolio: Some("first".to_string()),
            min_benefit: Some("lots".to_string()),
            max_benefit: Some("NaN".to_string()),
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let criteria = FilterCriteria::from_raw(&raw);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_raw_filter_or_prefers_self() {
        let cli = RawFilter {
            category: Some("ESG".to_string()),
            ..Default::default()
        };
        let config = RawFilter {
            category: Some("CapEx".to_string()),
            search: Some("plant".to_string()),
            ..Default::default()
        };
        let merged = cli.or(config);
        assert_eq!(merged.category.as_deref(), Some("ESG"));
        assert_eq!(merged.search.as_deref(), Some("plant"));
    }
}
