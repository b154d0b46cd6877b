pub(crate) mod labels;
pub mod record;
pub mod types;
pub mod validation;

pub use record::Record;
pub use types::{
    realization_percent, Category, FinanceApproval, Health, Idea, IdeaStatus, Portfolio, Project,
    ProjectStatus, Risk, Scores,
};
pub use validation::{validate_idea, validate_portfolio, validate_project};
