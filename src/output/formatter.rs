use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::catalog::Material;
use crate::scoring::{
    format_quantity, CatalogSummary, EvaluationResult, NumericAttribute, SearchResult,
};

/// How many matched criteria a card lists before summarizing the rest
const MATCHED_EXCERPT: usize = 3;

/// How many applications a card lists before eliding the rest
const APPLICATIONS_EXCERPT: usize = 2;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fulfillment as a whole percentage ("67%")
pub fn format_percentage(fulfillment: f64) -> String {
    format!("{:.0}%", fulfillment)
}

/// First applications joined, with "..." when some were left out
fn format_applications(material: &Material) -> String {
    let shown = material
        .typical_applications
        .iter()
        .take(APPLICATIONS_EXCERPT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if material.typical_applications.len() > APPLICATIONS_EXCERPT {
        format!("{}...", shown)
    } else {
        shown
    }
}

fn format_matched_excerpt(matched: &[String]) -> String {
    let shown = matched
        .iter()
        .take(MATCHED_EXCERPT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if matched.len() > MATCHED_EXCERPT {
        format!("{} (+{} more)", shown, matched.len() - MATCHED_EXCERPT)
    } else {
        shown
    }
}

/// Format one recommendation as a multi-line card
pub fn format_card(rank: usize, result: &EvaluationResult, use_colors: bool) -> String {
    let material = result.material;
    let description_width = get_terminal_width()
        .map(|w| w.saturating_sub(4).max(20))
        .unwrap_or(usize::MAX);

    let heading = format!("{:>2}. {}", rank, material.name);
    let score = format!(
        "score {}  fulfillment {}",
        result.score,
        format_percentage(result.fulfillment_percentage)
    );
    let properties = format!(
        "Dureza: {} Mohs | Conductividad: {} | Térmica: {} W/m·K | Costo: {}/5",
        format_quantity(material.hardness),
        material.electrical_conductivity_level,
        format_quantity(material.thermal_conductivity),
        material.relative_cost
    );
    let form = format!(
        "Forma: {} | Aplicaciones: {}",
        material.typical_form,
        format_applications(material)
    );

    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!("{}  {}", heading.bold(), score.cyan()));
        lines.push(format!("    {}", truncate(&material.description, description_width).dimmed()));
    } else {
        lines.push(format!("{}  {}", heading, score));
        lines.push(format!("    {}", truncate(&material.description, description_width)));
    }
    lines.push(format!("    {}", properties));
    lines.push(format!("    {}", form));

    if !result.matched_criteria.is_empty() {
        let label = format!("Matched ({}):", result.matched_criteria.len());
        let excerpt = format_matched_excerpt(&result.matched_criteria);
        if use_colors {
            lines.push(format!("    {} {}", label.green(), excerpt));
        } else {
            lines.push(format!("    {} {}", label, excerpt));
        }
    }
    if !result.missed_criteria.is_empty() {
        let label = format!("Missed ({}):", result.missed_criteria.len());
        let missed = result.missed_criteria.join(", ");
        if use_colors {
            lines.push(format!("    {} {}", label.red(), missed));
        } else {
            lines.push(format!("    {} {}", label, missed));
        }
    }

    lines.join("\n")
}

/// Format a search result as a header followed by one card per recommendation
pub fn format_recommendations(result: &SearchResult, use_colors: bool) -> String {
    if result.top_recommendations.is_empty() {
        return "No materials in the catalog.".to_string();
    }

    let header = format!(
        "Top {} of {} materials evaluated ({} criteria)",
        result.top_recommendations.len(),
        result.total_materials_evaluated,
        result.search_criteria.constraint_count()
    );

    let cards = result
        .top_recommendations
        .iter()
        .enumerate()
        .map(|(idx, r)| format_card(idx + 1, r, use_colors))
        .collect::<Vec<_>>()
        .join("\n\n");

    if use_colors {
        format!("{}\n\n{}", header.bold(), cards)
    } else {
        format!("{}\n\n{}", header, cards)
    }
}

/// Format a full ranking as one line per material: Index, Score, Fulfillment, Name, Id
/// Index column: 3 chars (fits "99."), right-aligned
pub fn format_ranked_table(results: &[EvaluationResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No materials in the catalog.".to_string();
    }

    let term_width = get_terminal_width();
    let score_width = 5;
    let percent_width = 4; // "100%"
    let separator = "  ";

    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>width$}", result.score, width = score_width);
            let percent_str = format!(
                "{:>width$}",
                format_percentage(result.fulfillment_percentage),
                width = percent_width
            );

            let id = &result.material.id;
            let fixed_width = 3 + 1 + score_width + percent_width + separator.len() * 3 + id.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate(&result.material.name, width - fixed_width)
                }
                Some(_) => truncate(&result.material.name, 20),
                None => result.material.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    percent_str,
                    separator,
                    name,
                    separator,
                    id.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_str, separator, percent_str, separator, name, separator, id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: score, fulfillment, id, name (no headers, no colors)
pub fn format_tsv(results: &[EvaluationResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{}\t{:.0}\t{}\t{}",
                result.score, result.fulfillment_percentage, result.material.id, result.material.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rows of the side-by-side comparison
#[derive(Debug, Clone, Copy)]
enum ComparisonRow {
    Numeric(NumericAttribute),
    ConductivityLevel,
    RelativeCost,
}

const COMPARISON_ROWS: [ComparisonRow; 7] = [
    ComparisonRow::Numeric(NumericAttribute::Hardness),
    ComparisonRow::Numeric(NumericAttribute::YoungModulus),
    ComparisonRow::Numeric(NumericAttribute::TensileStrength),
    ComparisonRow::Numeric(NumericAttribute::Density),
    ComparisonRow::Numeric(NumericAttribute::ThermalConductivity),
    ComparisonRow::ConductivityLevel,
    ComparisonRow::RelativeCost,
];

impl ComparisonRow {
    fn label(&self) -> String {
        match self {
            ComparisonRow::Numeric(attr) => format!("{} ({})", attr.label(), attr.unit()),
            ComparisonRow::ConductivityLevel => "Conductividad Eléctrica".to_string(),
            ComparisonRow::RelativeCost => "Costo Relativo".to_string(),
        }
    }

    fn cell(&self, material: &Material) -> String {
        match self {
            ComparisonRow::Numeric(attr) => format_quantity(attr.value(material)),
            ComparisonRow::ConductivityLevel => material.electrical_conductivity_level.to_string(),
            ComparisonRow::RelativeCost => format!("{}/5", material.relative_cost),
        }
    }
}

/// Format the recommendations side by side over a fixed attribute list
pub fn format_comparison_table(results: &[EvaluationResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No materials to compare.".to_string();
    }

    let headers: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(idx, r)| format!("#{} {}", idx + 1, r.material.name))
        .collect();
    let labels: Vec<String> = COMPARISON_ROWS.iter().map(|row| row.label()).collect();
    let cells: Vec<Vec<String>> = COMPARISON_ROWS
        .iter()
        .map(|row| results.iter().map(|r| row.cell(r.material)).collect())
        .collect();

    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let column_widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(COMPARISON_ROWS.len() + 2);

    let header_line = std::iter::once(format!("{:<width$}", "", width = label_width))
        .chain(
            headers
                .iter()
                .zip(&column_widths)
                .map(|(h, w)| format!("{:^width$}", h, width = *w)),
        )
        .collect::<Vec<_>>()
        .join("  ");
    if use_colors {
        lines.push(header_line.bold().to_string());
    } else {
        lines.push(header_line);
    }

    let rule_width = label_width + column_widths.iter().map(|w| w + 2).sum::<usize>();
    lines.push("-".repeat(rule_width));

    for (label, row) in labels.iter().zip(&cells) {
        let padded_label = format!("{:<width$}", label, width = label_width);
        let values = row
            .iter()
            .zip(&column_widths)
            .map(|(cell, w)| format!("{:^width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ");
        if use_colors {
            lines.push(format!("{}  {}", padded_label.dimmed(), values));
        } else {
            lines.push(format!("{}  {}", padded_label, values));
        }
    }

    lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the catalog summary as aligned "Label: value" lines
pub fn format_summary(summary: &CatalogSummary, use_colors: bool) -> String {
    let join = |items: Vec<String>| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    let rows = [
        ("Materials", summary.total_materials.to_string()),
        (
            "Forms",
            join(summary.material_types.iter().map(|f| f.to_string()).collect()),
        ),
        (
            "Conductivity levels",
            join(summary.conductivity_levels.iter().map(|l| l.to_string()).collect()),
        ),
        (
            "Hardness range",
            summary
                .hardness_range
                .map(|r| format!("{}-{} Mohs", format_quantity(r.min), format_quantity(r.max)))
                .unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Cost range",
            summary
                .cost_range
                .map(|r| format!("{}-{}", r.min, r.max))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len() + 1).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            let padded = format!("{:<width$}", format!("{}:", label), width = label_width);
            if use_colors {
                format!("{}  {}", padded.dimmed(), value.bold())
            } else {
                format!("{}  {}", padded, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
