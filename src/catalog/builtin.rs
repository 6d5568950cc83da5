//! Compiled-in catalog of carbon allotropes and carbon products.
//!
//! Figures are representative literature values, good enough to rank
//! candidates. They are not design data.

use super::types::{ConductivityLevel, Material, TypicalForm};

#[allow(clippy::too_many_arguments)]
fn material(
    id: &str,
    name: &str,
    description: &str,
    mechanical: [f64; 4],
    physical: [f64; 3],
    electrical: (f64, ConductivityLevel),
    thermal_conductivity: f64,
    relative_cost: u8,
    typical_form: TypicalForm,
    typical_applications: &[&str],
) -> Material {
    let [hardness, young_modulus, tensile_strength, compressive_strength] = mechanical;
    let [density, melting_point, temperature_resistance] = physical;
    let (electrical_conductivity, electrical_conductivity_level) = electrical;
    Material {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        hardness,
        young_modulus,
        tensile_strength,
        compressive_strength,
        density,
        melting_point,
        temperature_resistance,
        electrical_conductivity,
        electrical_conductivity_level,
        thermal_conductivity,
        relative_cost,
        typical_form,
        typical_applications: typical_applications.iter().map(|s| s.to_string()).collect(),
    }
}

/// Build the default catalog, in display order.
pub fn builtin_materials() -> Vec<Material> {
    use ConductivityLevel::*;
    use TypicalForm::*;

    vec![
        material(
            "diamond",
            "Diamante",
            "Red cristalina cúbica de carbono sp3, el material natural más duro conocido.",
            [10.0, 1050.0, 2800.0, 110000.0],
            [3.51, 3550.0, 700.0],
            (1e-13, Insulator),
            2200.0,
            5,
            Crystal,
            &["Herramientas de corte", "Disipadores térmicos", "Ventanas ópticas", "Joyería"],
        ),
        material(
            "graphite",
            "Grafito",
            "Capas de grafeno apiladas con enlaces débiles entre planos; blando y lubricante.",
            [1.5, 10.0, 20.0, 100.0],
            [2.26, 3652.0, 3000.0],
            (2e5, High),
            150.0,
            1,
            Powder,
            &["Electrodos", "Lubricantes sólidos", "Ánodos de baterías", "Crisoles"],
        ),
        material(
            "graphene",
            "Grafeno",
            "Monocapa bidimensional de átomos de carbono en red hexagonal.",
            [9.0, 1000.0, 130000.0, 5000.0],
            [2.27, 4200.0, 600.0],
            (1e8, Extreme),
            5000.0,
            5,
            Sheet,
            &["Electrónica flexible", "Sensores", "Membranas", "Compuestos conductores"],
        ),
        material(
            "swcnt",
            "Nanotubos de Carbono de Pared Simple",
            "Lámina de grafeno enrollada en un cilindro sin costura de diámetro nanométrico.",
            [9.0, 1000.0, 50000.0, 5000.0],
            [1.4, 4000.0, 750.0],
            (1e6, Extreme),
            3500.0,
            5,
            Tube,
            &["Transistores", "Películas conductoras transparentes", "Sensores químicos"],
        ),
        material(
            "mwcnt",
            "Nanotubos de Carbono de Pared Múltiple",
            "Cilindros concéntricos de grafeno; más económicos y robustos que los de pared simple.",
            [8.0, 900.0, 30000.0, 3000.0],
            [1.8, 3800.0, 650.0],
            (1e5, High),
            3000.0,
            3,
            Tube,
            &["Refuerzo de polímeros", "Aditivos conductores", "Baterías de ion litio"],
        ),
        material(
            "pan-carbon-fiber",
            "Fibra de Carbono (PAN)",
            "Fibra obtenida por carbonización de poliacrilonitrilo con alta resistencia específica.",
            [5.0, 230.0, 4900.0, 1600.0],
            [1.8, 3652.0, 500.0],
            (6.7e4, High),
            10.0,
            3,
            Fiber,
            &["Estructuras aeroespaciales", "Equipamiento deportivo", "Automoción", "Energía eólica"],
        ),
        material(
            "pitch-carbon-fiber",
            "Fibra de Carbono de Brea",
            "Fibra de alto módulo derivada de brea mesofásica con gran conductividad térmica.",
            [5.0, 900.0, 3500.0, 500.0],
            [2.2, 3652.0, 600.0],
            (7e5, High),
            800.0,
            4,
            Fiber,
            &["Satélites", "Gestión térmica", "Estructuras rígidas"],
        ),
        material(
            "glassy-carbon",
            "Carbono Vítreo",
            "Carbono no grafitizable, impermeable a gases y químicamente inerte.",
            [6.5, 30.0, 200.0, 580.0],
            [1.5, 3652.0, 3000.0],
            (2.2e4, Low),
            6.3,
            4,
            Crystal,
            &["Electrodos electroquímicos", "Crisoles de laboratorio", "Implantes"],
        ),
        material(
            "activated-carbon",
            "Carbón Activado",
            "Carbono poroso con superficie específica muy elevada.",
            [1.0, 5.0, 2.0, 10.0],
            [0.5, 3652.0, 400.0],
            (10.0, Low),
            0.2,
            1,
            Powder,
            &["Filtración de agua", "Adsorción de gases", "Supercondensadores"],
        ),
        material(
            "carbon-black",
            "Negro de Humo",
            "Partículas coloidales de carbono producidas por combustión incompleta.",
            [1.0, 3.0, 1.0, 5.0],
            [1.9, 3652.0, 500.0],
            (1e3, Low),
            0.3,
            1,
            Powder,
            &["Refuerzo de neumáticos", "Pigmentos", "Aditivo conductor"],
        ),
        material(
            "fullerene-c60",
            "Fullereno C60",
            "Molécula esférica de sesenta átomos de carbono.",
            [3.0, 15.0, 10.0, 100.0],
            [1.65, 600.0, 400.0],
            (1e-8, Insulator),
            0.4,
            5,
            Powder,
            &["Fotovoltaica orgánica", "Lubricantes", "Biomedicina"],
        ),
        material(
            "dlc",
            "Carbono Tipo Diamante (DLC)",
            "Recubrimiento amorfo con mezcla de enlaces sp2 y sp3, duro y de baja fricción.",
            [9.0, 300.0, 1000.0, 10000.0],
            [3.0, 3500.0, 350.0],
            (1e-6, Insulator),
            1.0,
            3,
            Sheet,
            &["Recubrimientos de herramientas", "Discos duros", "Componentes de motor"],
        ),
        material(
            "pyrolytic-graphite",
            "Grafito Pirolítico",
            "Grafito altamente orientado depositado en fase vapor; fuertemente anisótropo.",
            [2.0, 28.0, 80.0, 110.0],
            [2.2, 3652.0, 2500.0],
            (2.5e6, Extreme),
            1700.0,
            4,
            Sheet,
            &["Esparcidores de calor", "Monocromadores", "Levitación diamagnética"],
        ),
        material(
            "carbon-carbon",
            "Compuesto Carbono-Carbono",
            "Matriz de carbono reforzada con fibra de carbono para servicio a muy alta temperatura.",
            [4.0, 95.0, 300.0, 160.0],
            [1.7, 3652.0, 2000.0],
            (1e4, Low),
            40.0,
            4,
            Sheet,
            &["Discos de freno", "Toberas de cohete", "Escudos térmicos"],
        ),
    ]
}
