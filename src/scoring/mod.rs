pub mod criteria;
pub mod engine;
pub mod input;
pub mod validation;

pub use criteria::*;
pub use engine::{
    evaluate_material, CatalogSummary, EvaluationResult, RecommendationEngine, SearchResult,
    ValueRange, TOP_RECOMMENDATIONS,
};
pub use input::{parse_priority_assignment, BoundExpr, CriteriaOverrides, PriorityTarget};
pub use validation::validate_criteria;
