pub mod formatter;
pub mod summary;

pub use formatter::{
    format_currency, format_currency_full, format_date, format_idea_table, format_idea_tsv,
    format_percent, format_project_detail, format_project_table, format_project_tsv,
    format_score_breakdown, should_use_colors,
};
pub use summary::{format_summary, PortfolioSummary};
