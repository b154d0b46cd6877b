use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::model::{Health, Idea, Project};
use crate::scoring::{compute_score, ScoreResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format money in compact notation ($4.5M, $450K, $800)
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.0}K", amount / 1_000.0)
    } else {
        format!("${}", amount)
    }
}

/// Format money with thousands separators ($4,500,000)
pub fn format_currency_full(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

pub fn format_percent(value: u32) -> String {
    format!("{}%", value)
}

/// Format a timestamp as a short date ("Oct 19, 2026")
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width of the name column: the longest name, capped so a row fits the terminal.
fn name_column_width<'a>(names: impl Iterator<Item = &'a str>, fixed_width: usize) -> usize {
    let longest = names.map(|n| n.chars().count()).max().unwrap_or(0);
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        // Very narrow terminal
        Some(_) => longest.min(20),
        // No terminal (pipe), don't truncate
        None => longest,
    }
}

fn pad_name(name: &str, width: usize) -> String {
    let truncated = truncate_title(name, width);
    let len = truncated.chars().count();
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(len)))
}

fn health_marker(health: Health, use_colors: bool) -> String {
    if use_colors {
        match health {
            Health::Green => "●".green().to_string(),
            Health::Yellow => "●".yellow().to_string(),
            Health::Red => "●".red().to_string(),
        }
    } else {
        format!("{:<6}", health.label())
    }
}

/// Format projects as a table: Index, Health, Name, Category, Stage, Finance, Benefit, Progress
/// No headers; index is 1-based as shown to the user
pub fn format_project_table(projects: &[&Project], use_colors: bool) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    // index 3 + health 6 + category 12 + stage 22 + finance 8 + benefit 7 + progress 4 + separators
    let fixed_width = 3 + 1 + 6 + 12 + 22 + 8 + 7 + 4 + 2 * 7;
    let name_width = name_column_width(projects.iter().map(|p| p.name.as_str()), fixed_width);

    projects
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            let index_str = format!("{:>2}.", idx + 1);
            let name = pad_name(&project.name, name_width);
            let rest = format!(
                "{:<12}  {:<22}  {:<8}  {:>7}  {:>4}",
                project.category.label(),
                project.project_status.label(),
                project.finance_approval.label(),
                format_currency(project.benefit_projection),
                format_percent(project.progress as u32),
            );
            let health = health_marker(project.health, use_colors);

            if use_colors {
                format!("{} {}  {}  {}", index_str.dimmed(), health, name.bold(), rest)
            } else {
                format!("{} {}  {}  {}", index_str, health, name, rest)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ideas as a table: Index, Score, Title, Category, Status, Votes
/// Score is recomputed from the idea's criteria, never read from the cache
pub fn format_idea_table(ideas: &[&Idea], use_colors: bool) -> String {
    if ideas.is_empty() {
        return "No ideas found.".to_string();
    }

    // index 3 + score 3 + category 12 + status 12 + votes 9 + separators
    let fixed_width = 3 + 1 + 3 + 12 + 12 + 9 + 2 * 4;
    let title_width = name_column_width(ideas.iter().map(|i| i.title.as_str()), fixed_width);

    ideas
        .iter()
        .enumerate()
        .map(|(idx, idea)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>3}", compute_score(idea.scores.as_ref()));
            let title = pad_name(&idea.title, title_width);
            let rest = format!(
                "{:<12}  {:<12}  {:>3} votes",
                idea.category.label(),
                idea.status.label(),
                idea.votes,
            );

            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    title,
                    rest
                )
            } else {
                format!("{} {}  {}  {}", index_str, score_padded, title, rest)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format projects as tab-separated values for scripting
/// Columns: id, name, category, stage, finance, benefit, actual, progress, health (no headers, no colors)
pub fn format_project_tsv(projects: &[&Project]) -> String {
    projects
        .iter()
        .map(|p| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                p.id,
                p.name,
                p.category,
                p.project_status,
                p.finance_approval,
                p.benefit_projection,
                p.actual_benefit,
                p.progress,
                p.health
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ideas as tab-separated values for scripting
/// Columns: id, score, title, category, status, votes (no headers, no colors)
pub fn format_idea_tsv(ideas: &[&Idea]) -> String {
    ideas
        .iter()
        .map(|i| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                i.id,
                compute_score(i.scores.as_ref()),
                i.title,
                i.category,
                i.status,
                i.votes
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single project with detailed multi-line output (for verbose mode)
pub fn format_project_detail(project: &Project, use_colors: bool) -> String {
    let name = if use_colors {
        project.name.bold().to_string()
    } else {
        project.name.clone()
    };
    format!(
        "{}\n  PM: {}\n  Category: {}\n  Stage: {}\n  Finance: {}\n  Benefit: {} projected, {} realized ({})\n  Progress: {}\n  Health: {}  Risk: {}\n  Updated: {}",
        name,
        project.pm,
        project.category,
        project.project_status,
        project.finance_approval,
        format_currency_full(project.benefit_projection),
        format_currency_full(project.actual_benefit),
        format_percent(project.realization_percent()),
        format_percent(project.progress as u32),
        project.health,
        project.risk,
        format_date(project.last_updated)
    )
}

/// Format the per-criterion contributions behind an idea's priority score
pub fn format_score_breakdown(idea: &Idea, result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(result.contributions.len() + 3);
    let heading = format!("#{} {}", idea.id, idea.title);
    lines.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });

    for c in &result.contributions {
        let submitted = match c.submitted {
            Some(v) if v != c.value => format!(" (submitted {})", v),
            Some(_) => String::new(),
            None => " (missing)".to_string(),
        };
        lines.push(format!(
            "  {:<22} {:>2}/10 x {:>3.0}%  = {:>5.1}{}",
            c.label,
            c.value,
            c.weight * 100.0,
            c.points,
            submitted
        ));
    }

    let verdict = if result.is_convertible() {
        "ready to convert"
    } else {
        "below conversion threshold"
    };
    let total = format!("  Priority score: {} ({})", result.score, verdict);
    lines.push(if use_colors && result.is_convertible() {
        total.green().to_string()
    } else {
        total
    });

    lines.join("\n")
}
