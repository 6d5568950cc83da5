use crate::catalog::{ConductivityLevel, Material, TypicalForm};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority used when a constraint is present but no priority was given.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Resolve an optional priority. Zero counts as unset, like an absent value.
pub fn effective_priority(priority: Option<i32>) -> i32 {
    match priority {
        None | Some(0) => DEFAULT_PRIORITY,
        Some(p) => p,
    }
}

/// Render a property value. Magnitudes below 1e-6 or from 1e21 up use
/// exponent notation ("1e-13", "2.5e+21"), everything else prints plainly.
pub fn format_quantity(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => scientific,
    }
}

/// Inclusive bounds and weight for one numeric attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeCriterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Weight added to the score when the bounds hold (1-5 expected, not enforced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl RangeCriterion {
    /// True when at least one bound is set, i.e. the attribute takes part in scoring
    pub fn is_constrained(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// True when nothing at all is set (used to keep serialized criteria sparse)
    pub fn is_unset(&self) -> bool {
        !self.is_constrained() && self.priority.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        let meets_min = self.min.map_or(true, |min| value >= min);
        let meets_max = self.max.map_or(true, |max| value <= max);
        meets_min && meets_max
    }
}

/// Sparse search criteria.
///
/// Only attributes with a bound or a required value count as constraints.
/// Example YAML:
/// ```yaml
/// hardness: { min: 5, priority: 3 }
/// thermal_conductivity: { min: 100 }
/// electrical_conductivity_level: Alto
/// relative_cost_max: 3
/// cost_priority: 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub hardness: RangeCriterion,
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub young_modulus: RangeCriterion,
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub tensile_strength: RangeCriterion,
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub compressive_strength: RangeCriterion,
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub density: RangeCriterion,
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub melting_point: RangeCriterion,
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub temperature_resistance: RangeCriterion,
    /// Its priority also weights the conductivity level constraint
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub electrical_conductivity: RangeCriterion,
    #[serde(skip_serializing_if = "RangeCriterion::is_unset")]
    pub thermal_conductivity: RangeCriterion,

    /// Exact-match requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electrical_conductivity_level: Option<ConductivityLevel>,

    /// Ceiling: materials with a cost tier at or below this value match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_cost_max: Option<u8>,

    /// Exact-match requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typical_form: Option<TypicalForm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_priority: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_priority: Option<i32>,
}

impl SearchCriteria {
    /// Number of constraints a material will be checked against
    pub fn constraint_count(&self) -> usize {
        let numeric = NumericAttribute::ALL
            .iter()
            .filter(|attr| attr.criterion(self).is_constrained())
            .count();
        let categorical = CategoricalAttribute::ALL
            .iter()
            .filter(|attr| attr.is_constrained(self))
            .count();
        numeric + categorical
    }

    pub fn is_empty(&self) -> bool {
        self.constraint_count() == 0
    }

    /// Overlay `other` on top of `self`: every value set in `other` wins.
    pub fn merge(&mut self, other: &SearchCriteria) {
        for attr in NumericAttribute::ALL {
            let theirs = *attr.criterion(other);
            let ours = attr.criterion_mut(self);
            ours.min = theirs.min.or(ours.min);
            ours.max = theirs.max.or(ours.max);
            ours.priority = theirs.priority.or(ours.priority);
        }
        self.electrical_conductivity_level = other
            .electrical_conductivity_level
            .or(self.electrical_conductivity_level);
        self.relative_cost_max = other.relative_cost_max.or(self.relative_cost_max);
        self.typical_form = other.typical_form.or(self.typical_form);
        self.cost_priority = other.cost_priority.or(self.cost_priority);
        self.form_priority = other.form_priority.or(self.form_priority);
    }
}

/// Continuous attributes, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericAttribute {
    Hardness,
    YoungModulus,
    TensileStrength,
    CompressiveStrength,
    Density,
    MeltingPoint,
    TemperatureResistance,
    ElectricalConductivity,
    ThermalConductivity,
}

impl NumericAttribute {
    /// Evaluation order; also the order of matched/missed descriptions
    pub const ALL: [NumericAttribute; 9] = [
        NumericAttribute::Hardness,
        NumericAttribute::YoungModulus,
        NumericAttribute::TensileStrength,
        NumericAttribute::CompressiveStrength,
        NumericAttribute::Density,
        NumericAttribute::MeltingPoint,
        NumericAttribute::TemperatureResistance,
        NumericAttribute::ElectricalConductivity,
        NumericAttribute::ThermalConductivity,
    ];

    /// Config and command-line key (matches the `SearchCriteria` field name)
    pub fn key(&self) -> &'static str {
        match self {
            NumericAttribute::Hardness => "hardness",
            NumericAttribute::YoungModulus => "young_modulus",
            NumericAttribute::TensileStrength => "tensile_strength",
            NumericAttribute::CompressiveStrength => "compressive_strength",
            NumericAttribute::Density => "density",
            NumericAttribute::MeltingPoint => "melting_point",
            NumericAttribute::TemperatureResistance => "temperature_resistance",
            NumericAttribute::ElectricalConductivity => "electrical_conductivity",
            NumericAttribute::ThermalConductivity => "thermal_conductivity",
        }
    }

    /// Label used in matched/missed descriptions
    pub fn label(&self) -> &'static str {
        match self {
            NumericAttribute::Hardness => "Dureza",
            NumericAttribute::YoungModulus => "Módulo de Young",
            NumericAttribute::TensileStrength => "Resistencia a la Tracción",
            NumericAttribute::CompressiveStrength => "Resistencia a la Compresión",
            NumericAttribute::Density => "Densidad",
            NumericAttribute::MeltingPoint => "Punto de Fusión",
            NumericAttribute::TemperatureResistance => "Resistencia a la Temperatura",
            NumericAttribute::ElectricalConductivity => "Conductividad Eléctrica",
            NumericAttribute::ThermalConductivity => "Conductividad Térmica",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            NumericAttribute::Hardness => "Mohs",
            NumericAttribute::YoungModulus => "GPa",
            NumericAttribute::TensileStrength | NumericAttribute::CompressiveStrength => "MPa",
            NumericAttribute::Density => "g/cm³",
            NumericAttribute::MeltingPoint | NumericAttribute::TemperatureResistance => "°C",
            NumericAttribute::ElectricalConductivity => "S/m",
            NumericAttribute::ThermalConductivity => "W/m·K",
        }
    }

    pub fn value(&self, material: &Material) -> f64 {
        match self {
            NumericAttribute::Hardness => material.hardness,
            NumericAttribute::YoungModulus => material.young_modulus,
            NumericAttribute::TensileStrength => material.tensile_strength,
            NumericAttribute::CompressiveStrength => material.compressive_strength,
            NumericAttribute::Density => material.density,
            NumericAttribute::MeltingPoint => material.melting_point,
            NumericAttribute::TemperatureResistance => material.temperature_resistance,
            NumericAttribute::ElectricalConductivity => material.electrical_conductivity,
            NumericAttribute::ThermalConductivity => material.thermal_conductivity,
        }
    }

    pub fn criterion<'c>(&self, criteria: &'c SearchCriteria) -> &'c RangeCriterion {
        match self {
            NumericAttribute::Hardness => &criteria.hardness,
            NumericAttribute::YoungModulus => &criteria.young_modulus,
            NumericAttribute::TensileStrength => &criteria.tensile_strength,
            NumericAttribute::CompressiveStrength => &criteria.compressive_strength,
            NumericAttribute::Density => &criteria.density,
            NumericAttribute::MeltingPoint => &criteria.melting_point,
            NumericAttribute::TemperatureResistance => &criteria.temperature_resistance,
            NumericAttribute::ElectricalConductivity => &criteria.electrical_conductivity,
            NumericAttribute::ThermalConductivity => &criteria.thermal_conductivity,
        }
    }

    pub fn criterion_mut<'c>(&self, criteria: &'c mut SearchCriteria) -> &'c mut RangeCriterion {
        match self {
            NumericAttribute::Hardness => &mut criteria.hardness,
            NumericAttribute::YoungModulus => &mut criteria.young_modulus,
            NumericAttribute::TensileStrength => &mut criteria.tensile_strength,
            NumericAttribute::CompressiveStrength => &mut criteria.compressive_strength,
            NumericAttribute::Density => &mut criteria.density,
            NumericAttribute::MeltingPoint => &mut criteria.melting_point,
            NumericAttribute::TemperatureResistance => &mut criteria.temperature_resistance,
            NumericAttribute::ElectricalConductivity => &mut criteria.electrical_conductivity,
            NumericAttribute::ThermalConductivity => &mut criteria.thermal_conductivity,
        }
    }
}

impl fmt::Display for NumericAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NumericAttribute {
    type Err = String;

    /// Accepts `young_modulus` as well as `young-modulus`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        NumericAttribute::ALL
            .into_iter()
            .find(|attr| attr.key().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("unknown attribute '{}'", s.trim()))
    }
}

/// Categorical constraints, in evaluation order after the numeric ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalAttribute {
    ConductivityLevel,
    CostCeiling,
    Form,
}

/// Outcome of checking one categorical constraint against a material.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalCheck {
    pub satisfied: bool,
    pub priority: i32,
    /// The material's value, as displayed
    pub actual: String,
    /// The required value (or ceiling), as displayed
    pub required: String,
}

impl CategoricalAttribute {
    pub const ALL: [CategoricalAttribute; 3] = [
        CategoricalAttribute::ConductivityLevel,
        CategoricalAttribute::CostCeiling,
        CategoricalAttribute::Form,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoricalAttribute::ConductivityLevel => "Nivel de Conductividad",
            CategoricalAttribute::CostCeiling => "Costo Relativo",
            CategoricalAttribute::Form => "Forma",
        }
    }

    /// Word introducing the requirement in a missed description
    pub fn requirement_label(&self) -> &'static str {
        match self {
            CategoricalAttribute::CostCeiling => "máximo",
            CategoricalAttribute::ConductivityLevel | CategoricalAttribute::Form => "requerido",
        }
    }

    pub fn is_constrained(&self, criteria: &SearchCriteria) -> bool {
        match self {
            CategoricalAttribute::ConductivityLevel => criteria.electrical_conductivity_level.is_some(),
            CategoricalAttribute::CostCeiling => criteria.relative_cost_max.is_some(),
            CategoricalAttribute::Form => criteria.typical_form.is_some(),
        }
    }

    /// Raw priority for this constraint. The conductivity level shares the
    /// electrical conductivity weight.
    pub fn priority(&self, criteria: &SearchCriteria) -> Option<i32> {
        match self {
            CategoricalAttribute::ConductivityLevel => criteria.electrical_conductivity.priority,
            CategoricalAttribute::CostCeiling => criteria.cost_priority,
            CategoricalAttribute::Form => criteria.form_priority,
        }
    }

    /// Check the constraint, or `None` when the criteria do not set it.
    pub fn check(&self, material: &Material, criteria: &SearchCriteria) -> Option<CategoricalCheck> {
        let priority = effective_priority(self.priority(criteria));
        match self {
            CategoricalAttribute::ConductivityLevel => {
                criteria.electrical_conductivity_level.map(|required| CategoricalCheck {
                    satisfied: material.electrical_conductivity_level == required,
                    priority,
                    actual: material.electrical_conductivity_level.to_string(),
                    required: required.to_string(),
                })
            }
            CategoricalAttribute::CostCeiling => {
                criteria.relative_cost_max.map(|ceiling| CategoricalCheck {
                    satisfied: material.relative_cost <= ceiling,
                    priority,
                    actual: material.relative_cost.to_string(),
                    required: ceiling.to_string(),
                })
            }
            CategoricalAttribute::Form => criteria.typical_form.map(|required| CategoricalCheck {
                satisfied: material.typical_form == required,
                priority,
                actual: material.typical_form.to_string(),
                required: required.to_string(),
            }),
        }
    }
}
