use clap::{Args, Parser, Subcommand};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_pilot::config::{self, ViewConfig};
use portfolio_pilot::model::{
    validate_idea, validate_portfolio, validate_project, Category, Idea, Portfolio, Project, Scores,
};
use portfolio_pilot::output;
use portfolio_pilot::scoring::score_breakdown;
use portfolio_pilot::store::{self, new_idea, new_project, PortfolioStore};
use portfolio_pilot::view::{
    compose_view, FilterCriteria, RawFilter, SortDirection, SortKey, ViewRequest,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_STORE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

/// Filter and ordering flags shared by the listing commands
#[derive(Args, Debug, Default, Clone)]
struct ListArgs {
    /// Only records in this category (e.g. Production, ESG)
    #[arg(long)]
    category: Option<String>,

    /// Only records at this lifecycle status (e.g. Execution, "Under Review")
    #[arg(long)]
    status: Option<String>,

    /// Only records in this portfolio id
    #[arg(long)]
    portfolio: Option<String>,

    /// Minimum projected benefit (projects only)
    #[arg(long)]
    min_benefit: Option<String>,

    /// Maximum projected benefit (projects only)
    #[arg(long)]
    max_benefit: Option<String>,

    /// Case-insensitive text to find in the name, title or PM
    #[arg(short, long)]
    search: Option<String>,

    /// Sort key: name, category, benefitProjection, progress, status, financeApproval, votes, priorityScore
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, conflicts_with = "asc")]
    desc: bool,

    /// Sort ascending
    #[arg(long)]
    asc: bool,

    /// Show at most this many rows
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print tab-separated values for scripting
    #[arg(long)]
    tsv: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List projects (default if no subcommand)
    Projects(ListArgs),
    /// List ideas
    Ideas(ListArgs),
    /// Portfolio totals with the top projects and ideas
    Summary {
        /// Restrict to one portfolio id
        #[arg(long)]
        portfolio: Option<u64>,
    },
    /// Show how an idea's priority score is made up
    Score {
        /// Idea id
        id: u64,
    },
    /// Add a project
    AddProject {
        #[arg(long)]
        name: String,
        #[arg(long)]
        pm: String,
        #[arg(long)]
        category: String,
        /// Projected benefit in dollars
        #[arg(long)]
        benefit: f64,
        #[arg(long)]
        portfolio: Option<u64>,
    },
    /// Submit an idea with its criterion scores (0-10 each)
    AddIdea {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        submitter: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        portfolio: Option<u64>,
        #[arg(long, default_value_t = 5)]
        strategic: i32,
        #[arg(long, default_value_t = 5)]
        financial: i32,
        #[arg(long, default_value_t = 5)]
        feasibility: i32,
        #[arg(long, default_value_t = 5)]
        time_to_value: i32,
        /// Risk score; higher means less risky
        #[arg(long, default_value_t = 5)]
        risk: i32,
    },
    /// Add a portfolio
    AddPortfolio {
        #[arg(long)]
        name: String,
        #[arg(long)]
        owner: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Display color as #RRGGBB
        #[arg(long, default_value = "#0ea5e9")]
        color: String,
    },
    /// Delete a project by id
    DeleteProject { id: u64 },
    /// Delete an idea by id
    DeleteIdea { id: u64 },
    /// Add one vote to an idea
    Vote { id: u64 },
    /// Move a project to its next lifecycle stage
    Advance { id: u64 },
    /// Move a project back one lifecycle stage
    Regress { id: u64 },
    /// Turn an idea scoring at least 70 into a project
    Convert { id: u64 },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "portfolio-pilot")]
#[command(about = "Portfolio prioritization CLI: rank projects and ideas", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/portfolio-pilot/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the record store (overrides the config file)
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "portfolio_pilot=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn exit_with(code: i32, message: impl Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn exit_with_errors(code: i32, heading: &str, errors: Vec<String>) -> ! {
    eprintln!("{}", heading);
    for error in errors {
        eprintln!("  - {}", error);
    }
    std::process::exit(code);
}

fn parse_category(input: &str) -> Category {
    input
        .parse()
        .unwrap_or_else(|e| exit_with(EXIT_INPUT, format!("Invalid input: {}", e)))
}

/// Merge command-line flags over the configured view defaults.
fn build_request(args: &ListArgs, view: &ViewConfig) -> anyhow::Result<ViewRequest> {
    let raw = RawFilter {
        category: args.category.clone(),
        status: args.status.clone(),
        portfolio: args.portfolio.clone(),
        min_benefit: args.min_benefit.clone(),
        max_benefit: args.max_benefit.clone(),
        search: args.search.clone(),
    }
    .or(view.filter.clone().unwrap_or_default());

    let sort_key = match &args.sort {
        Some(s) => s.parse::<SortKey>()?,
        None => view.sort_key(),
    };

    let direction = if args.desc {
        SortDirection::Descending
    } else if args.asc {
        SortDirection::Ascending
    } else {
        view.direction()
    };

    let request = ViewRequest::new(FilterCriteria::from_raw(&raw), sort_key, direction);
    Ok(match args.limit {
        Some(limit) => request.with_limit(limit),
        None => request,
    })
}

fn save_or_exit(path: &Path, store: &mut PortfolioStore) {
    if let Err(e) = store::save_store(path, store) {
        exit_with(EXIT_STORE, format!("Store error: {:#}", e));
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Projects(ListArgs::default()));

    // Init runs before config loading: it is how a config gets created
    if let Commands::Init = command {
        let config_path = cli.config.map(PathBuf::from);
        if let Err(e) = config::init::run_init_wizard(config_path) {
            exit_with(EXIT_CONFIG, format!("Init error: {:#}", e));
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    if let Err(errors) = config::validate_config(&config) {
        exit_with_errors(EXIT_CONFIG, "Config errors:", errors);
    }

    // Load store
    let store_path = match cli.store.map(PathBuf::from).or_else(|| config.store.clone()) {
        Some(p) => p,
        None => store::get_store_path()
            .unwrap_or_else(|e| exit_with(EXIT_STORE, format!("Store error: {:#}", e))),
    };
    let mut store = match store::load_store(&store_path) {
        Ok(s) => s,
        Err(e) => exit_with(EXIT_STORE, format!("Store error: {:#}", e)),
    };
    debug!(path = %store_path.display(), "using store");

    let use_colors = output::should_use_colors();

    match command {
        Commands::Projects(args) => {
            let request = build_request(&args, &config.view)
                .unwrap_or_else(|e| exit_with(EXIT_INPUT, format!("Invalid input: {}", e)));
            let projects: Vec<&Project> = compose_view(&store.projects, &request);

            if args.tsv {
                println!("{}", output::format_project_tsv(&projects));
            } else if cli.verbose && !projects.is_empty() {
                for project in &projects {
                    println!("{}", output::format_project_detail(project, use_colors));
                    println!();
                }
            } else {
                println!("{}", output::format_project_table(&projects, use_colors));
            }
        }
        Commands::Ideas(args) => {
            let request = build_request(&args, &config.view)
                .unwrap_or_else(|e| exit_with(EXIT_INPUT, format!("Invalid input: {}", e)));
            let ideas: Vec<&Idea> = compose_view(&store.ideas, &request);

            if args.tsv {
                println!("{}", output::format_idea_tsv(&ideas));
            } else {
                println!("{}", output::format_idea_table(&ideas, use_colors));
            }
        }
        Commands::Summary { portfolio } => {
            let title = match portfolio {
                Some(id) => match store.find_portfolio(id) {
                    Some(p) => p.name.clone(),
                    None => exit_with(EXIT_INPUT, format!("Portfolio #{} not found", id)),
                },
                None => "All portfolios".to_string(),
            };

            let filter = FilterCriteria {
                portfolio_id: portfolio,
                ..Default::default()
            };
            let limit = config.view.preview_limit();
            let by_benefit = ViewRequest::new(
                filter.clone(),
                SortKey::BenefitProjection,
                SortDirection::Descending,
            );
            let by_priority =
                ViewRequest::new(filter, SortKey::PriorityScore, SortDirection::Descending);

            let projects = compose_view(&store.projects, &by_benefit);
            let ideas = compose_view(&store.ideas, &by_priority);
            let summary =
                output::PortfolioSummary::collect(projects.iter().copied(), ideas.iter().copied());

            let top_projects = &projects[..projects.len().min(limit)];
            let top_ideas = &ideas[..ideas.len().min(limit)];
            println!(
                "{}",
                output::format_summary(&title, &summary, top_projects, top_ideas, use_colors)
            );
        }
        Commands::Score { id } => {
            let idea = store
                .find_idea(id)
                .unwrap_or_else(|| exit_with(EXIT_INPUT, format!("Idea #{} not found", id)));
            let result = score_breakdown(idea.scores.as_ref());
            println!("{}", output::format_score_breakdown(idea, &result, use_colors));
        }
        Commands::AddProject {
            name,
            pm,
            category,
            benefit,
            portfolio,
        } => {
            let mut project = new_project(name, pm, parse_category(&category), benefit);
            project.portfolio_id = portfolio;
            if let Err(errors) = validate_project(&project) {
                exit_with_errors(EXIT_INPUT, "Invalid project:", errors);
            }
            let id = store.add_project(project);
            save_or_exit(&store_path, &mut store);
            println!("Added project #{}", id);
        }
        Commands::AddIdea {
            title,
            description,
            submitter,
            category,
            portfolio,
            strategic,
            financial,
            feasibility,
            time_to_value,
            risk,
        } => {
            let scores = Scores::new(strategic, financial, feasibility, time_to_value, risk);
            let mut idea = new_idea(title, description, submitter, parse_category(&category), scores);
            idea.portfolio_id = portfolio;
            if let Err(errors) = validate_idea(&idea) {
                exit_with_errors(EXIT_INPUT, "Invalid idea:", errors);
            }
            let id = store.add_idea(idea);
            save_or_exit(&store_path, &mut store);
            let score = store.find_idea(id).and_then(|i| i.priority_score).unwrap_or(0);
            println!("Added idea #{} (priority score {})", id, score);
        }
        Commands::AddPortfolio {
            name,
            owner,
            description,
            color,
        } => {
            let portfolio = Portfolio {
                id: 0,
                name,
                owner,
                description,
                color,
            };
            if let Err(errors) = validate_portfolio(&portfolio) {
                exit_with_errors(EXIT_INPUT, "Invalid portfolio:", errors);
            }
            let id = store.add_portfolio(portfolio);
            save_or_exit(&store_path, &mut store);
            println!("Added portfolio #{}", id);
        }
        Commands::DeleteProject { id } => {
            if !store.delete_project(id) {
                exit_with(EXIT_INPUT, format!("Project #{} not found", id));
            }
            save_or_exit(&store_path, &mut store);
            println!("Deleted project #{}", id);
        }
        Commands::DeleteIdea { id } => {
            if !store.delete_idea(id) {
                exit_with(EXIT_INPUT, format!("Idea #{} not found", id));
            }
            save_or_exit(&store_path, &mut store);
            println!("Deleted idea #{}", id);
        }
        Commands::Vote { id } => {
            let votes = store
                .vote_idea(id)
                .unwrap_or_else(|e| exit_with(EXIT_INPUT, e));
            save_or_exit(&store_path, &mut store);
            println!("Idea #{} now has {} votes", id, votes);
        }
        Commands::Advance { id } => {
            let stage = store
                .advance_project(id)
                .unwrap_or_else(|e| exit_with(EXIT_INPUT, e));
            save_or_exit(&store_path, &mut store);
            println!("Project #{} is now at {}", id, stage);
        }
        Commands::Regress { id } => {
            let stage = store
                .regress_project(id)
                .unwrap_or_else(|e| exit_with(EXIT_INPUT, e));
            save_or_exit(&store_path, &mut store);
            println!("Project #{} is now at {}", id, stage);
        }
        Commands::Convert { id } => {
            let project_id = store
                .convert_idea(id)
                .unwrap_or_else(|e| exit_with(EXIT_INPUT, e));
            save_or_exit(&store_path, &mut store);
            println!("Converted idea #{} into project #{}", id, project_id);
        }
        Commands::Init => unreachable!("handled before config loading"),
    }

    std::process::exit(EXIT_SUCCESS);
}
