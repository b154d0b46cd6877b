use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;

labelled_enum! {
    /// Business area a project or idea belongs to.
    pub enum Category {
        Production => "Production",
        Distribution => "Distribution",
        Esg => "ESG",
        Technology => "Technology",
        Healthcare => "Healthcare",
        Operations => "Operations",
        CapEx => "CapEx",
        Customer => "Customer",
    }
}

labelled_enum! {
    /// Project lifecycle stage, in pipeline order.
    pub enum ProjectStatus {
        Creation => "Creation",
        FeasibilityAssessment => "Feasibility Assessment",
        Commitment => "Commitment",
        Execution => "Execution",
        BenefitTracking => "Benefit Tracking",
    }
}

labelled_enum! {
    pub enum IdeaStatus {
        UnderReview => "Under Review",
        Approved => "Approved",
        Converting => "Converting",
    }
}

labelled_enum! {
    /// Finance sign-off, independent of the lifecycle stage.
    pub enum FinanceApproval {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
        OnHold => "On Hold",
    }
}

labelled_enum! {
    pub enum Health {
        Green => "green",
        Yellow => "yellow",
        Red => "red",
    }
}

labelled_enum! {
    pub enum Risk {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl ProjectStatus {
    /// Next stage in the pipeline; stays put at the last stage.
    pub fn advanced(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// Previous stage in the pipeline; stays put at the first stage.
    pub fn regressed(self) -> Self {
        let idx = self.position();
        Self::ALL[idx.saturating_sub(1)]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Submitted prioritization scores for an idea.
///
/// Each criterion is nominally in [0,10]. Missing values count as 0 and
/// out-of-range values are clamped when scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategic_alignment: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_impact: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feasibility: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_value: Option<i32>,
    /// Pre-inverted: higher means lower risk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<i32>,
}

impl Scores {
    pub fn new(
        strategic_alignment: i32,
        financial_impact: i32,
        feasibility: i32,
        time_to_value: i32,
        risk_level: i32,
    ) -> Self {
        Self {
            strategic_alignment: Some(strategic_alignment),
            financial_impact: Some(financial_impact),
            feasibility: Some(feasibility),
            time_to_value: Some(time_to_value),
            risk_level: Some(risk_level),
        }
    }

    /// Every criterion at the midpoint, the default for a fresh submission.
    pub fn neutral() -> Self {
        Self::new(5, 5, 5, 5, 5)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub submitter: String,
    #[serde(default)]
    pub votes: u32,
    pub status: IdeaStatus,
    pub category: Category,
    #[serde(default)]
    pub portfolio_id: Option<u64>,
    #[serde(default)]
    pub scores: Option<Scores>,
    /// Last computed priority score. Written on save, never read for ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<u32>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub pm: String,
    pub category: Category,
    #[serde(default)]
    pub portfolio_id: Option<u64>,
    pub benefit_projection: f64,
    #[serde(default)]
    pub actual_benefit: f64,
    #[serde(default)]
    pub progress: u8,
    pub project_status: ProjectStatus,
    pub finance_approval: FinanceApproval,
    pub health: Health,
    pub risk: Risk,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Project {
    /// Realized benefit as a percentage of the projection, capped at 100.
    pub fn realization_percent(&self) -> u32 {
        realization_percent(self.actual_benefit, self.benefit_projection)
    }
}

/// Share of `projection` already realized by `actual`, in [0,100].
pub fn realization_percent(actual: f64, projection: f64) -> u32 {
    if projection <= 0.0 {
        return 0;
    }
    ((actual / projection) * 100.0).round().clamp(0.0, 100.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: u64,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#0ea5e9".to_string()
}
