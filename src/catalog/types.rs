use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative electrical conductivity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConductivityLevel {
    #[serde(rename = "Aislante")]
    Insulator,
    #[serde(rename = "Conductor Bajo")]
    Low,
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Extremo")]
    Extreme,
}

impl ConductivityLevel {
    pub const ALL: [ConductivityLevel; 4] = [
        ConductivityLevel::Insulator,
        ConductivityLevel::Low,
        ConductivityLevel::High,
        ConductivityLevel::Extreme,
    ];

    /// Display label, as shown to users and stored in catalog files
    pub fn label(&self) -> &'static str {
        match self {
            ConductivityLevel::Insulator => "Aislante",
            ConductivityLevel::Low => "Conductor Bajo",
            ConductivityLevel::High => "Alto",
            ConductivityLevel::Extreme => "Extremo",
        }
    }

    /// Command-line friendly key
    pub fn key(&self) -> &'static str {
        match self {
            ConductivityLevel::Insulator => "aislante",
            ConductivityLevel::Low => "conductor-bajo",
            ConductivityLevel::High => "alto",
            ConductivityLevel::Extreme => "extremo",
        }
    }
}

impl fmt::Display for ConductivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConductivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ConductivityLevel::ALL
            .into_iter()
            .find(|level| level.key().eq_ignore_ascii_case(s) || level.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown conductivity level '{}' (expected one of: {})",
                    s,
                    ConductivityLevel::ALL.map(|l| l.key()).join(", ")
                )
            })
    }
}

/// Shape the material is usually supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypicalForm {
    #[serde(rename = "Fibra")]
    Fiber,
    #[serde(rename = "Polvo")]
    Powder,
    #[serde(rename = "Cristal")]
    Crystal,
    #[serde(rename = "Lámina")]
    Sheet,
    #[serde(rename = "Tubo")]
    Tube,
}

impl TypicalForm {
    pub const ALL: [TypicalForm; 5] = [
        TypicalForm::Fiber,
        TypicalForm::Powder,
        TypicalForm::Crystal,
        TypicalForm::Sheet,
        TypicalForm::Tube,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TypicalForm::Fiber => "Fibra",
            TypicalForm::Powder => "Polvo",
            TypicalForm::Crystal => "Cristal",
            TypicalForm::Sheet => "Lámina",
            TypicalForm::Tube => "Tubo",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TypicalForm::Fiber => "fibra",
            TypicalForm::Powder => "polvo",
            TypicalForm::Crystal => "cristal",
            TypicalForm::Sheet => "lamina",
            TypicalForm::Tube => "tubo",
        }
    }
}

impl fmt::Display for TypicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TypicalForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Labels carry an accent ("Lámina"), so compare labels with full Unicode lowercasing
        let lowered = s.to_lowercase();
        TypicalForm::ALL
            .into_iter()
            .find(|form| form.key().eq_ignore_ascii_case(s) || form.label().to_lowercase() == lowered)
            .ok_or_else(|| {
                format!(
                    "unknown form '{}' (expected one of: {})",
                    s,
                    TypicalForm::ALL.map(|f| f.key()).join(", ")
                )
            })
    }
}

/// A carbon material in the catalog.
///
/// Materials are immutable once the catalog is loaded; scoring only ever
/// borrows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub description: String,

    pub hardness: f64,             // Mohs
    pub young_modulus: f64,        // GPa
    pub tensile_strength: f64,     // MPa
    pub compressive_strength: f64, // MPa

    pub density: f64,                // g/cm³
    pub melting_point: f64,          // °C
    pub temperature_resistance: f64, // °C

    pub electrical_conductivity: f64, // S/m
    pub electrical_conductivity_level: ConductivityLevel,

    pub thermal_conductivity: f64, // W/m·K

    pub relative_cost: u8, // 1 (cheap) to 5 (expensive)
    pub typical_form: TypicalForm,
    #[serde(default)]
    pub typical_applications: Vec<String>,
}
