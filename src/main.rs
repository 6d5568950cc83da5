use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use carbon_match::catalog::{Catalog, ConductivityLevel, TypicalForm};
use carbon_match::config::Config;
use carbon_match::scoring::{
    CriteriaOverrides, NumericAttribute, RecommendationEngine, SearchCriteria,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CRITERIA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    /// Human-readable cards (or a ranked table with --all)
    #[default]
    Table,
    /// Tab-separated: score, fulfillment, id, name
    Tsv,
    /// Full result as JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank materials against criteria (default if no subcommand)
    Search(SearchArgs),
    /// Compare the top recommendations side by side
    Compare {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },
    /// Show catalog statistics
    Stats {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved searches from the config file
    Profiles,
}

/// Flags of `search`, also accepted without the subcommand name
#[derive(Args, Debug, Default, PartialEq)]
struct SearchArgs {
    #[command(flatten)]
    criteria: CriteriaArgs,

    /// Show every material, not just the top recommendations
    #[arg(long)]
    all: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

/// Criteria flags shared by `search` and `compare`.
///
/// Ranges accept ">=N", "<=N", "N-M" (inclusive) or "N" (exact).
#[derive(Args, Debug, Default, PartialEq)]
struct CriteriaArgs {
    /// Start from a saved search in the config file
    #[arg(short, long, value_name = "NAME")]
    profile: Option<String>,

    /// Start from a YAML criteria file (applied after --profile)
    #[arg(long, value_name = "FILE")]
    criteria: Option<PathBuf>,

    /// Hardness range (Mohs)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    hardness: Option<String>,

    /// Young's modulus range (GPa)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    young_modulus: Option<String>,

    /// Tensile strength range (MPa)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    tensile_strength: Option<String>,

    /// Compressive strength range (MPa)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    compressive_strength: Option<String>,

    /// Density range (g/cm³)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    density: Option<String>,

    /// Melting point range (°C)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    melting_point: Option<String>,

    /// Temperature resistance range (°C)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    temperature_resistance: Option<String>,

    /// Electrical conductivity range (S/m)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    electrical_conductivity: Option<String>,

    /// Thermal conductivity range (W/m·K)
    #[arg(long, value_name = "RANGE", allow_hyphen_values = true)]
    thermal_conductivity: Option<String>,

    /// Required conductivity level (aislante, conductor-bajo, alto, extremo)
    #[arg(long)]
    level: Option<ConductivityLevel>,

    /// Highest acceptable cost tier (1-5)
    #[arg(long, value_name = "TIER")]
    max_cost: Option<u8>,

    /// Required form (fibra, polvo, cristal, lamina, tubo)
    #[arg(long)]
    form: Option<TypicalForm>,

    /// Weight of a constraint, e.g. "hardness=3", "cost=5" (repeatable)
    #[arg(long = "priority", value_name = "KEY=N")]
    priorities: Vec<String>,
}

impl CriteriaArgs {
    fn overrides(&self) -> CriteriaOverrides {
        let bounds = [
            (NumericAttribute::Hardness, &self.hardness),
            (NumericAttribute::YoungModulus, &self.young_modulus),
            (NumericAttribute::TensileStrength, &self.tensile_strength),
            (NumericAttribute::CompressiveStrength, &self.compressive_strength),
            (NumericAttribute::Density, &self.density),
            (NumericAttribute::MeltingPoint, &self.melting_point),
            (NumericAttribute::TemperatureResistance, &self.temperature_resistance),
            (NumericAttribute::ElectricalConductivity, &self.electrical_conductivity),
            (NumericAttribute::ThermalConductivity, &self.thermal_conductivity),
        ];

        CriteriaOverrides {
            bounds: bounds
                .into_iter()
                .filter_map(|(attr, expr)| expr.clone().map(|expr| (attr, expr)))
                .collect(),
            level: self.level,
            max_cost: self.max_cost,
            form: self.form,
            priorities: self.priorities.clone(),
        }
    }

    /// Build criteria: saved search, then criteria file, then flags
    fn build(&self, config: &Config) -> Result<SearchCriteria> {
        carbon_match::config::resolve_criteria(
            config,
            self.profile.as_deref(),
            self.criteria.as_deref(),
            &self.overrides(),
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "carbon-match")]
#[command(about = "Carbon material recommendation CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/carbon-match/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(flatten)]
    search: SearchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    if let Err(e) = carbon_match::telemetry::init(cli.verbose) {
        eprintln!("Logging disabled: {:#}", e);
    }

    let command = match resolve_command(cli.search, cli.command) {
        Ok(command) => command,
        Err(e) => e.exit(),
    };

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match carbon_match::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Load catalog once; it is never modified afterwards
    let catalog = match config.catalog {
        Some(ref path) => match carbon_match::catalog::load_catalog(path) {
            Ok(c) => {
                tracing::info!(path = %path.display(), materials = c.len(), "loaded catalog");
                c
            }
            Err(e) => {
                eprintln!("Catalog error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
        None => {
            let catalog = Catalog::builtin();
            tracing::debug!(materials = catalog.len(), "using built-in catalog");
            catalog
        }
    };

    let engine = RecommendationEngine::new(&catalog);
    let use_colors = carbon_match::output::should_use_colors();

    match command {
        Commands::Search(SearchArgs {
            criteria,
            all,
            format,
        }) => {
            let criteria = build_criteria(&criteria, &config);
            let output = if all {
                let ranked = engine.rank(&criteria);
                match format {
                    OutputFormat::Table => carbon_match::output::format_ranked_table(&ranked, use_colors),
                    OutputFormat::Tsv => carbon_match::output::format_tsv(&ranked),
                    OutputFormat::Json => to_json(&ranked),
                }
            } else {
                let result = engine.recommend(&criteria);
                match format {
                    OutputFormat::Table => carbon_match::output::format_recommendations(&result, use_colors),
                    OutputFormat::Tsv => carbon_match::output::format_tsv(&result.top_recommendations),
                    OutputFormat::Json => to_json(&result),
                }
            };
            println!("{}", output);
        }
        Commands::Compare { criteria } => {
            let criteria = build_criteria(&criteria, &config);
            let result = engine.recommend(&criteria);
            println!(
                "{}",
                carbon_match::output::format_comparison_table(&result.top_recommendations, use_colors)
            );
        }
        Commands::Stats { json } => {
            let summary = engine.catalog_summary();
            if json {
                println!("{}", to_json(&summary));
            } else {
                println!("{}", carbon_match::output::format_summary(&summary, use_colors));
            }
        }
        Commands::Profiles => {
            if config.searches.is_empty() {
                eprintln!("No saved searches configured.");
                eprintln!("Add searches to ~/.config/carbon-match/config.yaml:");
                eprintln!("  searches:");
                eprintln!("    - name: cheap-conductors");
                eprintln!("      criteria:");
                eprintln!("        electrical_conductivity_level: Alto");
                eprintln!("        relative_cost_max: 2");
            }
            for search in &config.searches {
                println!(
                    "{}\t{} criteria\t{}",
                    search.name,
                    search.criteria.constraint_count(),
                    search.description.as_deref().unwrap_or("")
                );
            }
        }
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}

/// Without a subcommand the top-level flags are a search. Search flags
/// before another subcommand are an error.
fn resolve_command(
    search: SearchArgs,
    command: Option<Commands>,
) -> Result<Commands, clap::Error> {
    match command {
        None => Ok(Commands::Search(search)),
        Some(_) if search != SearchArgs::default() => Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            "search flags must come after the subcommand, or be used without one",
        )),
        Some(command) => Ok(command),
    }
}

/// Build criteria from flags, exiting on invalid input. Suspicious but
/// well-formed values are only warned about.
fn build_criteria(args: &CriteriaArgs, config: &Config) -> SearchCriteria {
    let criteria = match args.build(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Criteria error: {:#}", e);
            std::process::exit(EXIT_CRITERIA);
        }
    };

    for warning in carbon_match::scoring::validate_criteria(&criteria) {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(constraints = criteria.constraint_count(), "built search criteria");

    criteria
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}
