use super::types::Material;
use super::validation::validate_catalog;
use super::Catalog;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a catalog from a file
///
/// `.json` files are parsed as JSON; any other extension is parsed as YAML.
/// Both formats hold a plain list of materials.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The content cannot be parsed
/// - The materials fail validation (all problems are listed)
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let materials: Vec<Material> = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid YAML in {}", path.display()))?
    };

    if let Err(errors) = validate_catalog(&materials) {
        anyhow::bail!(
            "Invalid catalog in {}:\n  - {}",
            path.display(),
            errors.join("\n  - ")
        );
    }

    Ok(Catalog::new(materials))
}
