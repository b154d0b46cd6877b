use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::Record;
use crate::scoring::compute_score;

/// Field a listing can be ordered by.
///
/// `PriorityScore` is derived: it is recomputed from the record's scores on
/// every comparison rather than read from a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Category,
    BenefitProjection,
    Progress,
    Status,
    FinanceApproval,
    Votes,
    PriorityScore,
}

impl SortKey {
    pub const ALL: &'static [SortKey] = &[
        SortKey::Name,
        SortKey::Category,
        SortKey::BenefitProjection,
        SortKey::Progress,
        SortKey::Status,
        SortKey::FinanceApproval,
        SortKey::Votes,
        SortKey::PriorityScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::BenefitProjection => "benefitProjection",
            SortKey::Progress => "progress",
            SortKey::Status => "status",
            SortKey::FinanceApproval => "financeApproval",
            SortKey::Votes => "votes",
            SortKey::PriorityScore => "priorityScore",
        }
    }

    /// Parse a key name, falling back to `Name` (with a warning) when the
    /// name is not recognized.
    pub fn parse_or_default(s: &str) -> SortKey {
        s.parse().unwrap_or_else(|e| {
            warn!("{}; sorting by name", e);
            SortKey::default()
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let parsed = match key.as_str() {
            "name" | "title" => SortKey::Name,
            "category" => SortKey::Category,
            "benefitprojection" | "benefit" => SortKey::BenefitProjection,
            "progress" => SortKey::Progress,
            "status" | "stage" => SortKey::Status,
            "financeapproval" | "finance" => SortKey::FinanceApproval,
            "votes" => SortKey::Votes,
            "priorityscore" | "priority" | "score" => SortKey::PriorityScore,
            _ => bail!("Unknown sort key '{}'", s.trim()),
        };
        Ok(parsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => bail!("Unknown sort direction '{}'. Expected asc or desc", other),
        }
    }
}

/// Return `records` ordered by `key`.
///
/// The sort is stable in both directions: records that compare equal keep
/// their input order. The input is not modified.
pub fn sort_records<'a, R, I>(records: I, key: SortKey, direction: SortDirection) -> Vec<&'a R>
where
    R: Record + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut sorted: Vec<&R> = records.into_iter().collect();
    sorted.sort_by(|a, b| direction.apply(compare_by_key(*a, *b, key)));
    sorted
}

/// Ascending comparison of two records on a single key.
pub fn compare_by_key<R: Record + ?Sized>(a: &R, b: &R, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_text(a.display_name(), b.display_name()),
        SortKey::Category => compare_text(a.category().label(), b.category().label()),
        SortKey::BenefitProjection => compare_number(a.benefit_projection(), b.benefit_projection()),
        SortKey::Progress => compare_number(
            a.progress().map(f64::from),
            b.progress().map(f64::from),
        ),
        SortKey::Status => compare_text(a.status_label(), b.status_label()),
        SortKey::FinanceApproval => match (a.finance_label(), b.finance_label()) {
            (Some(x), Some(y)) => compare_text(x, y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        },
        SortKey::Votes => compare_number(a.votes().map(f64::from), b.votes().map(f64::from)),
        SortKey::PriorityScore => compute_score(a.scores()).cmp(&compute_score(b.scores())),
    }
}

thread_local! {
    // Root-locale collation at secondary strength: accents count, case does not.
    static COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        Collator::try_new(&Default::default(), options)
            .map_err(|e| warn!("Collation unavailable, ordering text by lowercase: {}", e))
            .ok()
    };
}

/// Locale-aware ordering, with the raw strings breaking case-only ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}

/// Numeric ordering where a missing value sorts below any present value.
///
/// NaN counts as missing, which keeps the ordering total.
fn compare_number(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.filter(|v| !v.is_nan());
    let b = b.filter(|v| !v.is_nan());
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (x, y) => x.is_some().cmp(&y.is_some()),
    }
}
