use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{
    Category, FinanceApproval, Health, Idea, IdeaStatus, Portfolio, Project, ProjectStatus, Risk,
    Scores,
};
use crate::scoring::{compute_score, CONVERSION_THRESHOLD};

pub const STORE_VERSION: u32 = 1;

/// Everything the application persists: projects, ideas and portfolios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStore {
    pub version: u32,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub ideas: Vec<Idea>,
    #[serde(default)]
    pub portfolios: Vec<Portfolio>,
}

impl Default for PortfolioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioStore {
    /// Create a new empty store with the current version
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            projects: Vec::new(),
            ideas: Vec::new(),
            portfolios: Vec::new(),
        }
    }

    pub fn find_project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn find_idea(&self, id: u64) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == id)
    }

    pub fn find_portfolio(&self, id: u64) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.id == id)
    }

    /// Store a new project under the next free id and return that id.
    pub fn add_project(&mut self, mut project: Project) -> u64 {
        project.id = next_id(self.projects.iter().map(|p| p.id));
        project.last_updated = Utc::now();
        let id = project.id;
        self.projects.push(project);
        id
    }

    /// Store a new idea under the next free id and return that id.
    pub fn add_idea(&mut self, mut idea: Idea) -> u64 {
        idea.id = next_id(self.ideas.iter().map(|i| i.id));
        idea.last_updated = Utc::now();
        idea.priority_score = Some(compute_score(idea.scores.as_ref()));
        let id = idea.id;
        self.ideas.push(idea);
        id
    }

    pub fn add_portfolio(&mut self, mut portfolio: Portfolio) -> u64 {
        portfolio.id = next_id(self.portfolios.iter().map(|p| p.id));
        let id = portfolio.id;
        self.portfolios.push(portfolio);
        id
    }

    /// Edit a project in place and stamp it as updated.
    pub fn update_project<F>(&mut self, id: u64, edit: F) -> Result<&Project>
    where
        F: FnOnce(&mut Project),
    {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .with_context(|| format!("Project #{} not found", id))?;
        edit(project);
        project.last_updated = Utc::now();
        Ok(&*project)
    }

    /// Edit an idea in place and stamp it as updated.
    pub fn update_idea<F>(&mut self, id: u64, edit: F) -> Result<&Idea>
    where
        F: FnOnce(&mut Idea),
    {
        let idea = self
            .ideas
            .iter_mut()
            .find(|i| i.id == id)
            .with_context(|| format!("Idea #{} not found", id))?;
        edit(idea);
        idea.last_updated = Utc::now();
        Ok(&*idea)
    }

    /// Remove a project.
    /// Returns true if the project existed, false otherwise
    pub fn delete_project(&mut self, id: u64) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() != before
    }

    /// Remove an idea.
    /// Returns true if the idea existed, false otherwise
    pub fn delete_idea(&mut self, id: u64) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|i| i.id != id);
        self.ideas.len() != before
    }

    /// Add one vote to an idea, returning the new total.
    pub fn vote_idea(&mut self, id: u64) -> Result<u32> {
        let idea = self.update_idea(id, |idea| idea.votes = idea.votes.saturating_add(1))?;
        Ok(idea.votes)
    }

    /// Move a project one stage forward, returning the resulting stage.
    pub fn advance_project(&mut self, id: u64) -> Result<ProjectStatus> {
        let project = self.update_project(id, |p| p.project_status = p.project_status.advanced())?;
        Ok(project.project_status)
    }

    /// Move a project one stage back, returning the resulting stage.
    pub fn regress_project(&mut self, id: u64) -> Result<ProjectStatus> {
        let project =
            self.update_project(id, |p| p.project_status = p.project_status.regressed())?;
        Ok(project.project_status)
    }

    /// Promote an idea to a project and remove the idea.
    ///
    /// The idea's recomputed priority score must reach the conversion
    /// threshold. Returns the new project's id.
    pub fn convert_idea(&mut self, idea_id: u64) -> Result<u64> {
        let idea = self
            .find_idea(idea_id)
            .with_context(|| format!("Idea #{} not found", idea_id))?;

        let score = compute_score(idea.scores.as_ref());
        if score < CONVERSION_THRESHOLD {
            bail!(
                "Idea #{} has priority score {}; it must be at least {} to convert",
                idea_id,
                score,
                CONVERSION_THRESHOLD
            );
        }

        let project = project_from_idea(idea);
        let project_id = self.add_project(project);
        self.delete_idea(idea_id);
        Ok(project_id)
    }

    /// Rewrite every idea's cached priority score from its current scores.
    pub fn refresh_score_cache(&mut self) {
        for idea in &mut self.ideas {
            idea.priority_score = Some(compute_score(idea.scores.as_ref()));
        }
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

fn project_from_idea(idea: &Idea) -> Project {
    let mut project = new_project(idea.title.clone(), "Unassigned".to_string(), idea.category, 0.0);
    project.portfolio_id = idea.portfolio_id;
    project.comments = idea.comments.clone();
    project
}

/// Blank project with the defaults of the creation form.
pub fn new_project(name: String, pm: String, category: Category, benefit_projection: f64) -> Project {
    Project {
        id: 0,
        name,
        pm,
        category,
        portfolio_id: None,
        benefit_projection,
        actual_benefit: 0.0,
        progress: 0,
        project_status: ProjectStatus::Creation,
        finance_approval: FinanceApproval::Pending,
        health: Health::Green,
        risk: Risk::Low,
        comments: Vec::new(),
        last_updated: Utc::now(),
    }
}

/// Fresh submission: no votes yet, under review.
pub fn new_idea(
    title: String,
    description: String,
    submitter: String,
    category: Category,
    scores: Scores,
) -> Idea {
    Idea {
        id: 0,
        title,
        description,
        submitter,
        votes: 0,
        status: IdeaStatus::UnderReview,
        category,
        portfolio_id: None,
        scores: Some(scores),
        priority_score: None,
        comments: Vec::new(),
        last_updated: Utc::now(),
    }
}
