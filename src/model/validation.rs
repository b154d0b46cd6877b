use super::types::{Idea, Portfolio, Project};
use crate::scoring::CRITERIA;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 1000;
const MAX_PORTFOLIO_NAME_LEN: usize = 100;
const MAX_BENEFIT: f64 = 1_000_000_000.0;

/// Validate a project before it is stored.
/// Returns all validation errors at once (not just the first).
pub fn validate_project(project: &Project) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_text(&mut errors, "project.name", &project.name, MAX_NAME_LEN);

    if project.pm.trim().is_empty() {
        errors.push("project.pm: project manager is required".to_string());
    }

    let benefit = project.benefit_projection;
    if !benefit.is_finite() || benefit <= 0.0 {
        errors.push("project.benefitProjection: must be a positive number".to_string());
    } else if benefit > MAX_BENEFIT {
        errors.push("project.benefitProjection: must not exceed 1,000,000,000".to_string());
    }

    if !project.actual_benefit.is_finite() || project.actual_benefit < 0.0 {
        errors.push("project.actualBenefit: must be non-negative".to_string());
    }

    if project.progress > 100 {
        errors.push(format!(
            "project.progress: must be between 0 and 100, got {}",
            project.progress
        ));
    }

    finish(errors)
}

/// Validate an idea before it is stored.
pub fn validate_idea(idea: &Idea) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_text(&mut errors, "idea.title", &idea.title, MAX_NAME_LEN);
    check_text(&mut errors, "idea.description", &idea.description, MAX_DESCRIPTION_LEN);

    if idea.submitter.trim().is_empty() {
        errors.push("idea.submitter: submitter name is required".to_string());
    }

    if let Some(ref scores) = idea.scores {
        for criterion in &CRITERIA {
            if let Some(value) = criterion.value(scores) {
                if !(0..=criterion.max).contains(&value) {
                    errors.push(format!(
                        "idea.scores.{}: must be between 0 and {}, got {}",
                        criterion.key, criterion.max, value
                    ));
                }
            }
        }
    }

    finish(errors)
}

/// Validate a portfolio before it is stored.
pub fn validate_portfolio(portfolio: &Portfolio) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_text(&mut errors, "portfolio.name", &portfolio.name, MAX_PORTFOLIO_NAME_LEN);

    if portfolio.owner.trim().is_empty() {
        errors.push("portfolio.owner: owner is required".to_string());
    }

    if !is_hex_color(&portfolio.color) {
        errors.push(format!(
            "portfolio.color: invalid '{}' - use #RRGGBB",
            portfolio.color
        ));
    }

    finish(errors)
}

fn check_text(errors: &mut Vec<String>, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.push(format!("{}: is required", field));
    } else if value.chars().count() > max_len {
        errors.push(format!("{}: must be {} characters or less", field, max_len));
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn finish(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
