use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::SearchCriteria;

/// Tool configuration.
///
/// Example YAML:
/// ```yaml
/// catalog: ~/materials.json
/// searches:
///   - name: conductive-fiber
///     description: Fibers that carry current
///     criteria:
///       electrical_conductivity: { min: 10000, priority: 4 }
///       typical_form: Fibra
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog file replacing the built-in catalog. A leading `~/` is the
    /// home directory; other relative paths are relative to this file.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Saved searches, selectable with `--profile NAME`
    #[serde(default)]
    pub searches: Vec<SavedSearch>,
}

impl Config {
    /// Find a saved search by name (case-insensitive)
    pub fn find_search(&self, name: &str) -> Option<&SavedSearch> {
        self.searches
            .iter()
            .find(|search| search.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SavedSearch {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub criteria: SearchCriteria,
}
