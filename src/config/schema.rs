use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::view::{RawFilter, SortDirection, SortKey};

pub const DEFAULT_PREVIEW_LIMIT: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Record store location; defaults to ~/.config/portfolio-pilot/portfolio.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
    #[serde(default)]
    pub view: ViewConfig,
}

/// Defaults applied to every listing unless overridden on the command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ViewConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RawFilter>,
}

impl ViewConfig {
    pub fn sort_key(&self) -> SortKey {
        self.sort
            .as_deref()
            .map(SortKey::parse_or_default)
            .unwrap_or_default()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction.unwrap_or_default()
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_limit.unwrap_or(DEFAULT_PREVIEW_LIMIT)
    }
}

/// Check a loaded config, collecting every problem instead of stopping at the first.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(sort) = &config.view.sort {
        if let Err(e) = sort.parse::<SortKey>() {
            errors.push(format!("view.sort: {}", e));
        }
    }

    if config.view.preview_limit == Some(0) {
        errors.push("view.preview_limit: must be at least 1".to_string());
    }

    if let Some(store) = &config.store {
        if store.as_os_str().is_empty() {
            errors.push("store: path must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
