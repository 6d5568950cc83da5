use super::criteria::{CategoricalAttribute, NumericAttribute, SearchCriteria};

const PRIORITY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Check search criteria for values that are probably mistakes.
///
/// Scoring accepts any well-typed criteria, so nothing here is fatal: the
/// caller logs the warnings and runs the search unchanged. Returns all
/// warnings at once (not just the first).
pub fn validate_criteria(criteria: &SearchCriteria) -> Vec<String> {
    let mut warnings = Vec::new();

    for attr in NumericAttribute::ALL {
        let criterion = attr.criterion(criteria);

        if let (Some(min), Some(max)) = (criterion.min, criterion.max) {
            if min > max {
                warnings.push(format!(
                    "criteria.{}: min {} is greater than max {}, no material can match",
                    attr.key(),
                    min,
                    max
                ));
            }
        }

        if let Some(priority) = criterion.priority {
            check_priority(&mut warnings, &format!("{}.priority", attr.key()), priority);

            // The electrical conductivity weight also applies to the level constraint
            let used_by_level = attr == NumericAttribute::ElectricalConductivity
                && CategoricalAttribute::ConductivityLevel.is_constrained(criteria);
            if !criterion.is_constrained() && !used_by_level {
                warnings.push(format!(
                    "criteria.{}.priority: set without min or max, ignored",
                    attr.key()
                ));
            }
        }
    }

    if let Some(ceiling) = criteria.relative_cost_max {
        if !(1..=5).contains(&ceiling) {
            warnings.push(format!(
                "criteria.relative_cost_max: {} is outside the 1-5 cost scale",
                ceiling
            ));
        }
    }

    for (attr, field, constraint) in [
        (CategoricalAttribute::CostCeiling, "cost_priority", "relative_cost_max"),
        (CategoricalAttribute::Form, "form_priority", "typical_form"),
    ] {
        if let Some(priority) = attr.priority(criteria) {
            check_priority(&mut warnings, field, priority);
            if !attr.is_constrained(criteria) {
                warnings.push(format!(
                    "criteria.{}: set without {}, ignored",
                    field, constraint
                ));
            }
        }
    }

    warnings
}

fn check_priority(warnings: &mut Vec<String>, field: &str, priority: i32) {
    if priority == 0 {
        warnings.push(format!(
            "criteria.{}: 0 counts as unset, the default priority 1 applies",
            field
        ));
    } else if !PRIORITY_RANGE.contains(&priority) {
        warnings.push(format!(
            "criteria.{}: {} is outside 1-5, used as-is",
            field, priority
        ));
    }
}
