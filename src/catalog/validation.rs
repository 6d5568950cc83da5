use super::types::Material;
use std::collections::HashSet;

/// Validate a catalog after loading.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalog(materials: &[Material]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, material) in materials.iter().enumerate() {
        if material.id.trim().is_empty() {
            errors.push(format!("materials[{}].id: must not be empty", i));
        } else if !seen_ids.insert(material.id.as_str()) {
            errors.push(format!("materials[{}].id: duplicate id '{}'", i, material.id));
        }

        if material.name.trim().is_empty() {
            errors.push(format!("materials[{}].name: must not be empty", i));
        }

        if !(1..=5).contains(&material.relative_cost) {
            errors.push(format!(
                "materials[{}].relative_cost: {} is outside 1-5",
                i, material.relative_cost
            ));
        }

        let numeric = [
            ("hardness", material.hardness),
            ("young_modulus", material.young_modulus),
            ("tensile_strength", material.tensile_strength),
            ("compressive_strength", material.compressive_strength),
            ("density", material.density),
            ("melting_point", material.melting_point),
            ("temperature_resistance", material.temperature_resistance),
            ("electrical_conductivity", material.electrical_conductivity),
            ("thermal_conductivity", material.thermal_conductivity),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                errors.push(format!("materials[{}].{}: must be a finite number", i, field));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
