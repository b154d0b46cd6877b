use owo_colors::OwoColorize;

use super::formatter::{format_currency, format_idea_table, format_percent, format_project_table};
use crate::model::{realization_percent, Health, Idea, Project};

/// Totals over a set of projects and ideas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSummary {
    pub projects: usize,
    pub ideas: usize,
    pub projected: f64,
    pub realized: f64,
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl PortfolioSummary {
    pub fn collect<'a>(
        projects: impl IntoIterator<Item = &'a Project>,
        ideas: impl IntoIterator<Item = &'a Idea>,
    ) -> Self {
        let mut summary = projects
            .into_iter()
            .fold(PortfolioSummary::default(), |mut acc, p| {
                acc.projects += 1;
                acc.projected += p.benefit_projection;
                acc.realized += p.actual_benefit;
                match p.health {
                    Health::Green => acc.green += 1,
                    Health::Yellow => acc.yellow += 1,
                    Health::Red => acc.red += 1,
                }
                acc
            });
        summary.ideas = ideas.into_iter().count();
        summary
    }

    pub fn realization_percent(&self) -> u32 {
        realization_percent(self.realized, self.projected)
    }
}

/// Format the summary header followed by the two preview lists.
///
/// `top_projects` and `top_ideas` are expected to be already ordered and truncated.
pub fn format_summary(
    title: &str,
    summary: &PortfolioSummary,
    top_projects: &[&Project],
    top_ideas: &[&Idea],
    use_colors: bool,
) -> String {
    let heading = |text: &str| {
        if use_colors {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    };

    let mut out = Vec::new();
    out.push(heading(title));
    out.push(format!(
        "Projects: {}  Ideas: {}",
        summary.projects, summary.ideas
    ));
    out.push(format!(
        "Benefit: {} projected, {} realized ({})",
        format_currency(summary.projected),
        format_currency(summary.realized),
        format_percent(summary.realization_percent())
    ));
    out.push(format!(
        "Health: {} green, {} yellow, {} red",
        summary.green, summary.yellow, summary.red
    ));
    out.push(String::new());
    out.push(heading("Top projects by projected benefit"));
    out.push(format_project_table(top_projects, use_colors));
    out.push(String::new());
    out.push(heading("Top ideas by priority score"));
    out.push(format_idea_table(top_ideas, use_colors));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seeded_store;

    #[test]
    fn test_collect_seed_totals() {
        let store = seeded_store();
        let summary = PortfolioSummary::collect(&store.projects, &store.ideas);
        assert_eq!(summary.projects, 6);
        assert_eq!(summary.ideas, 4);
        assert_eq!(summary.projected, 32_400_000.0);
        assert_eq!(summary.realized, 11_100_000.0);
        assert_eq!(summary.green, 4);
        assert_eq!(summary.yellow, 2);
        assert_eq!(summary.red, 0);
        assert_eq!(summary.realization_percent(), 34);
    }

    #[test]
    fn test_collect_empty() {
        let projects: Vec<Project> = Vec::new();
        let ideas: Vec<Idea> = Vec::new();
        let summary = PortfolioSummary::collect(&projects, &ideas);
        assert_eq!(summary, PortfolioSummary::default());
        assert_eq!(summary.realization_percent(), 0);
    }

    #[test]
    fn test_format_summary() {
        let store = seeded_store();
        let summary = PortfolioSummary::collect(&store.projects, &store.ideas);
        let projects: Vec<&Project> = store.projects.iter().take(2).collect();
        let text = format_summary("All portfolios", &summary, &projects, &[], false);
        assert!(text.starts_with("All portfolios\n"));
        assert!(text.contains("Benefit: $32.4M projected, $11.1M realized (34%)"));
        assert!(text.contains("Health: 4 green, 2 yellow, 0 red"));
        assert!(text.contains("No ideas found."));
    }
}
