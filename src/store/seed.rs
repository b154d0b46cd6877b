use chrono::Utc;

use super::types::{PortfolioStore, STORE_VERSION};
use crate::model::{
    Category, FinanceApproval, Health, Idea, IdeaStatus, Portfolio, Project, ProjectStatus, Risk,
    Scores,
};

/// Sample portfolio used until the user saves a store of their own.
pub fn seeded_store() -> PortfolioStore {
    let mut store = PortfolioStore {
        version: STORE_VERSION,
        projects: seed_projects(),
        ideas: seed_ideas(),
        portfolios: seed_portfolios(),
    };
    store.refresh_score_cache();
    store
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: u64,
    name: &str,
    status: ProjectStatus,
    finance: FinanceApproval,
    health: Health,
    pm: &str,
    category: Category,
    benefit: (f64, f64),
    progress: u8,
    risk: Risk,
    portfolio_id: u64,
) -> Project {
    Project {
        id,
        name: name.to_string(),
        pm: pm.to_string(),
        category,
        portfolio_id: Some(portfolio_id),
        benefit_projection: benefit.0,
        actual_benefit: benefit.1,
        progress,
        project_status: status,
        finance_approval: finance,
        health,
        risk,
        comments: Vec::new(),
        last_updated: Utc::now(),
    }
}

fn seed_projects() -> Vec<Project> {
    use FinanceApproval as F;
    use ProjectStatus as S;
    vec![
        project(1, "Air Separation Unit (ASU) Efficiency Upgrade", S::Execution, F::Approved, Health::Green,
            "Sarah Chen", Category::Production, (4_500_000.0, 3_200_000.0), 72, Risk::Low, 1),
        project(2, "Hydrogen Production Plant Expansion", S::FeasibilityAssessment, F::Pending, Health::Yellow,
            "Michael Ross", Category::CapEx, (12_000_000.0, 1_500_000.0), 25, Risk::Medium, 1),
        project(3, "CO2 Capture & Sequestration Initiative", S::Commitment, F::Approved, Health::Green,
            "Emily Watson", Category::Esg, (8_500_000.0, 2_100_000.0), 40, Risk::Low, 2),
        project(4, "Cryogenic Tank Fleet Modernization", S::Execution, F::Approved, Health::Green,
            "David Kim", Category::Distribution, (3_200_000.0, 2_400_000.0), 78, Risk::Low, 1),
        project(5, "Smart Cylinder Tracking System (IoT)", S::BenefitTracking, F::Approved, Health::Green,
            "Lisa Park", Category::Technology, (1_800_000.0, 1_500_000.0), 85, Risk::Low, 2),
        project(6, "Nitrogen Generator On-Site Deployment", S::FeasibilityAssessment, F::OnHold, Health::Yellow,
            "James Miller", Category::Customer, (2_400_000.0, 400_000.0), 30, Risk::High, 1),
    ]
}

fn idea(
    id: u64,
    title: &str,
    description: &str,
    submitter: &str,
    votes: u32,
    status: IdeaStatus,
    category: Category,
    portfolio_id: u64,
    scores: Scores,
) -> Idea {
    Idea {
        id,
        title: title.to_string(),
        description: description.to_string(),
        submitter: submitter.to_string(),
        votes,
        status,
        category,
        portfolio_id: Some(portfolio_id),
        scores: Some(scores),
        priority_score: None,
        comments: Vec::new(),
        last_updated: Utc::now(),
    }
}

fn seed_ideas() -> Vec<Idea> {
    vec![
        idea(1, "Ammonia Cracking for Blue Hydrogen", "Explore ammonia cracking technology",
            "John Miller", 38, IdeaStatus::UnderReview, Category::Production, 1, Scores::new(8, 7, 6, 5, 7)),
        idea(2, "Predictive Maintenance for Compressors", "AI-driven predictive maintenance",
            "Amy Liu", 45, IdeaStatus::Approved, Category::Operations, 1, Scores::new(9, 8, 8, 7, 8)),
        idea(3, "Carbon Footprint Dashboard for Customers", "Real-time emissions tracking",
            "Robert Chen", 31, IdeaStatus::UnderReview, Category::Esg, 2, Scores::new(7, 6, 7, 6, 8)),
        idea(4, "Specialty Gas Mixing Automation", "Automated gas mixing",
            "Nina Patel", 52, IdeaStatus::Converting, Category::Production, 1, Scores::new(8, 8, 7, 7, 7)),
    ]
}

fn seed_portfolios() -> Vec<Portfolio> {
    let portfolio = |id: u64, name: &str, owner: &str, description: &str, color: &str| Portfolio {
        id,
        name: name.to_string(),
        owner: owner.to_string(),
        description: description.to_string(),
        color: color.to_string(),
    };
    vec![
        portfolio(1, "Strategic Initiatives 2025", "Sarah Chen", "High-impact strategic projects", "#0ea5e9"),
        portfolio(2, "ESG & Sustainability", "Emily Watson", "Environmental and sustainability projects", "#8b5cf6"),
        portfolio(3, "Operational Excellence", "David Kim", "Efficiency and operational improvements", "#10b981"),
    ]
}
