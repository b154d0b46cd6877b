use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, ViewConfig, DEFAULT_PREVIEW_LIMIT};
use crate::model::Category;
use crate::store::get_store_path;
use crate::view::{RawFilter, SortDirection, SortKey};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn join_names<T>(items: &[T], name: impl Fn(&T) -> &str) -> String {
    items.iter().map(name).collect::<Vec<_>>().join(", ")
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Portfolio Pilot Configuration Wizard");
    println!("====================================");
    println!();

    // 1. Store location
    println!("Projects, ideas and portfolios are kept in a single JSON file.");
    let default_store = get_store_path()?;
    let store_str = prompt_with_default("Store file", &default_store.display().to_string())?;
    let store = PathBuf::from(&store_str);
    let store = if store == default_store { None } else { Some(store) };

    // 2. Default ordering
    println!();
    println!("Listings are sorted by name unless you pick another default.");
    println!("Sort keys: {}", join_names(SortKey::ALL, |k| k.name()));
    let sort = loop {
        let input = prompt_with_default("Default sort key", SortKey::Name.name())?;
        match input.parse::<SortKey>() {
            Ok(key) => break key,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };
    let direction = loop {
        let input = prompt_with_default("Sort direction (asc/desc)", "asc")?;
        match input.parse::<SortDirection>() {
            Ok(d) => break d,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 3. Summary preview size
    println!();
    let preview_limit: usize = loop {
        let input = prompt_with_default(
            "Rows shown per list in the summary",
            &DEFAULT_PREVIEW_LIMIT.to_string(),
        )?;
        match input.parse::<usize>() {
            Ok(v) if v >= 1 => break v,
            _ => println!("  Invalid: must be a whole number of at least 1. Try again."),
        }
    };

    // 4. Optional default category filter
    println!();
    let filter = if prompt_yes_no("Only show one category by default?", false)? {
        println!("Categories: {}", join_names(Category::ALL, |c| c.label()));
        let category = loop {
            let input = prompt("  Category: ")?;
            match input.parse::<Category>() {
                Ok(c) => break c,
                Err(e) => println!("  Invalid: {}. Try again.", e),
            }
        };
        Some(RawFilter {
            category: Some(category.label().to_string()),
            ..Default::default()
        })
    } else {
        None
    };

    // 5. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 6. Write config
    let config = Config {
        store,
        view: ViewConfig {
            sort: Some(sort.name().to_string()),
            direction: Some(direction),
            preview_limit: Some(preview_limit),
            filter,
        },
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `portfolio-pilot` to get started.");

    Ok(())
}
