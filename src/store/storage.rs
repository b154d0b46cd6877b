use super::seed::seeded_store;
use super::types::{PortfolioStore, STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the default store file path (~/.config/portfolio-pilot/portfolio.json)
pub fn get_store_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("portfolio.json"))
}

/// Load the record store from a JSON file
///
/// If the file doesn't exist, returns the built-in sample portfolio.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path) -> Result<PortfolioStore> {
    if !path.exists() {
        debug!(path = %path.display(), "no store file, using sample data");
        return Ok(seeded_store());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open store file at {}", path.display()))?;

    let store: PortfolioStore = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load store from {}", path.display()))?;

    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported store version: {}", store.version);
    }

    debug!(
        projects = store.projects.len(),
        ideas = store.ideas.len(),
        portfolios = store.portfolios.len(),
        "loaded store"
    );

    Ok(store)
}

/// Save the record store to a JSON file atomically
///
/// Refreshes every cached idea score first, so the file never carries a
/// score older than the scores it was computed from. Creates the parent
/// directory if it doesn't exist.
pub fn save_store(path: &Path, store: &mut PortfolioStore) -> Result<()> {
    store.refresh_score_cache();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize store")?;

    file.commit().context("Failed to save store")?;

    debug!(path = %path.display(), "saved store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Scores};
    use crate::store::types::{new_idea, new_project};
    use std::env;

    #[test]
    fn test_load_missing_file_returns_seed() {
        let temp_path = env::temp_dir().join("portfolio_pilot_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let store = load_store(&temp_path).unwrap();
        assert_eq!(store.version, 1);
        assert_eq!(store.projects.len(), 6);
        assert_eq!(store.ideas.len(), 4);
        assert_eq!(store.portfolios.len(), 3);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("portfolio_pilot_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = PortfolioStore::new();
        store.add_project(new_project(
            "Digital Twin".to_string(),
            "David Kim".to_string(),
            Category::Technology,
            2_800_000.0,
        ));
        store.add_idea(new_idea(
            "Gas Purity Monitoring".to_string(),
            "Real-time purity".to_string(),
            "Lisa Park".to_string(),
            Category::Technology,
            Scores::new(8, 7, 8, 6, 8),
        ));

        save_store(&temp_path, &mut store).unwrap();
        let loaded = load_store(&temp_path).unwrap();

        assert_eq!(loaded, store);
        assert_eq!(loaded.ideas[0].priority_score, Some(75));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_save_refreshes_stale_cache() {
        let temp_path = env::temp_dir().join("portfolio_pilot_test_stale.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = PortfolioStore::new();
        store.add_idea(new_idea(
            "Fleet Pilot".to_string(),
            "Electric delivery".to_string(),
            "Marcus Johnson".to_string(),
            Category::Distribution,
            Scores::new(6, 7, 5, 5, 6),
        ));
        store.ideas[0].priority_score = Some(3);

        save_store(&temp_path, &mut store).unwrap();
        let loaded = load_store(&temp_path).unwrap();
        assert_eq!(loaded.ideas[0].priority_score, Some(59));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let temp_path = env::temp_dir().join("portfolio_pilot_test_version.json");
        std::fs::write(&temp_path, r#"{"version": 2}"#).unwrap();

        let err = load_store(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported store version: 2"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
