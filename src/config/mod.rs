mod schema;

pub use schema::{Config, SavedSearch};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::{CriteriaOverrides, SearchCriteria};

/// Get the config directory path (~/.config/carbon-match/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("carbon-match"))
}

/// Get the default config file path (~/.config/carbon-match/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/carbon-match/config.yaml), and a missing default file yields
///   the default config.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - Saved search names are duplicated
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    if let Err(errors) = validate_config(&config) {
        anyhow::bail!(
            "Invalid config in {}:\n  - {}",
            config_path.display(),
            errors.join("\n  - ")
        );
    }

    // "~/" is the home directory; other relative paths are relative to the config file
    if let Some(catalog) = config.catalog.take() {
        config.catalog = Some(resolve_relative(&config_path, catalog));
    }

    Ok(config)
}

fn resolve_relative(config_path: &Path, path: PathBuf) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path.is_absolute() {
        return path;
    }
    match config_path.parent() {
        Some(parent) => parent.join(path),
        None => path,
    }
}

/// Validate configuration after parsing.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, search) in config.searches.iter().enumerate() {
        let name = search.name.trim();
        if name.is_empty() {
            errors.push(format!("searches[{}].name: must not be empty", i));
        } else if !seen.insert(name.to_ascii_lowercase()) {
            errors.push(format!("searches[{}].name: duplicate name '{}'", i, name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Load search criteria from a standalone YAML file
pub fn load_criteria(path: &Path) -> Result<SearchCriteria> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria file at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse criteria: invalid YAML in {}", path.display()))
}

/// Assemble search criteria: the saved search named `profile`, then the
/// criteria file, then command-line overrides. Later layers only replace
/// the values they set.
pub fn resolve_criteria(
    config: &Config,
    profile: Option<&str>,
    criteria_file: Option<&Path>,
    overrides: &CriteriaOverrides,
) -> Result<SearchCriteria> {
    let mut criteria = SearchCriteria::default();

    if let Some(name) = profile {
        let search = config.find_search(name).with_context(|| {
            format!("Unknown profile '{}'. Run `carbon-match profiles` to list them", name)
        })?;
        criteria.merge(&search.criteria);
    }

    if let Some(path) = criteria_file {
        criteria.merge(&load_criteria(path)?);
    }

    overrides.apply(&mut criteria)?;
    Ok(criteria)
}
