pub mod seed;
pub mod storage;
pub mod types;

pub use seed::seeded_store;
pub use storage::{get_store_path, load_store, save_store};
pub use types::{new_idea, new_project, PortfolioStore, STORE_VERSION};
