pub mod formatter;

pub use formatter::{
    format_card, format_comparison_table, format_percentage, format_ranked_table,
    format_recommendations, format_summary, format_tsv, should_use_colors,
};
