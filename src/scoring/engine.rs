use serde::Serialize;

use super::criteria::{
    effective_priority, format_quantity, CategoricalAttribute, NumericAttribute, SearchCriteria,
};
use crate::catalog::{Catalog, ConductivityLevel, Material, TypicalForm};

/// How many ranked materials a search returns.
pub const TOP_RECOMMENDATIONS: usize = 3;

/// One material scored against one set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult<'a> {
    pub material: &'a Material,
    /// Sum of the priorities of satisfied constraints
    pub score: i64,
    /// Share of considered constraints that hold, 0-100
    pub fulfillment_percentage: f64,
    pub matched_criteria: Vec<String>, // e.g. "Dureza: 7"
    pub missed_criteria: Vec<String>,  // e.g. "Dureza: 3 (requerido: 5 - max)"
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<'a> {
    pub top_recommendations: Vec<EvaluationResult<'a>>,
    pub total_materials_evaluated: usize,
    pub search_criteria: SearchCriteria,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

/// Aggregate view of the catalog. Ranges are `None` for an empty catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_materials: usize,
    /// Distinct forms, in order of first appearance
    pub material_types: Vec<TypicalForm>,
    /// Distinct conductivity levels, in order of first appearance
    pub conductivity_levels: Vec<ConductivityLevel>,
    pub cost_range: Option<ValueRange<u8>>,
    pub hardness_range: Option<ValueRange<f64>>,
}

/// Ranks the materials of a catalog against search criteria.
///
/// Stateless apart from the borrowed catalog, so one engine can serve any
/// number of searches, from any thread.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Score every material and return the best three.
    pub fn recommend(&self, criteria: &SearchCriteria) -> SearchResult<'a> {
        let mut ranked = self.rank(criteria);
        ranked.truncate(TOP_RECOMMENDATIONS);

        SearchResult {
            top_recommendations: ranked,
            total_materials_evaluated: self.catalog.len(),
            search_criteria: criteria.clone(),
        }
    }

    /// Score every material, sorted by score descending.
    ///
    /// The sort is stable: equal scores keep catalog order.
    pub fn rank(&self, criteria: &SearchCriteria) -> Vec<EvaluationResult<'a>> {
        let mut results: Vec<_> = self
            .catalog
            .materials()
            .iter()
            .map(|material| evaluate_material(material, criteria))
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            materials = results.len(),
            constraints = criteria.constraint_count(),
            top_score = results.first().map(|r| r.score),
            "ranked catalog"
        );

        results
    }

    pub fn catalog_summary(&self) -> CatalogSummary {
        summarize(self.catalog.materials())
    }
}

/// Score a single material. Constraints are checked in a fixed order, which
/// is also the order of the matched and missed descriptions.
pub fn evaluate_material<'a>(
    material: &'a Material,
    criteria: &SearchCriteria,
) -> EvaluationResult<'a> {
    let mut score: i64 = 0;
    let mut total_constraints = 0usize;
    let mut fulfilled_constraints = 0usize;
    let mut matched_criteria = Vec::new();
    let mut missed_criteria = Vec::new();

    for attr in NumericAttribute::ALL {
        let criterion = attr.criterion(criteria);
        if !criterion.is_constrained() {
            continue;
        }
        total_constraints += 1;

        let value = attr.value(material);
        if criterion.contains(value) {
            fulfilled_constraints += 1;
            score += i64::from(effective_priority(criterion.priority));
            matched_criteria.push(format!("{}: {}", attr.label(), format_quantity(value)));
        } else {
            let min = criterion.min.map_or_else(|| "min".to_string(), format_quantity);
            let max = criterion.max.map_or_else(|| "max".to_string(), format_quantity);
            missed_criteria.push(format!(
                "{}: {} (requerido: {} - {})",
                attr.label(),
                format_quantity(value),
                min,
                max
            ));
        }
    }

    for attr in CategoricalAttribute::ALL {
        let Some(check) = attr.check(material, criteria) else {
            continue;
        };
        total_constraints += 1;

        if check.satisfied {
            fulfilled_constraints += 1;
            score += i64::from(check.priority);
            matched_criteria.push(format!("{}: {}", attr.label(), check.actual));
        } else {
            missed_criteria.push(format!(
                "{}: {} ({}: {})",
                attr.label(),
                check.actual,
                attr.requirement_label(),
                check.required
            ));
        }
    }

    let fulfillment_percentage = if total_constraints > 0 {
        (fulfilled_constraints as f64 / total_constraints as f64) * 100.0
    } else {
        0.0
    };

    EvaluationResult {
        material,
        score,
        fulfillment_percentage,
        matched_criteria,
        missed_criteria,
    }
}

fn summarize(materials: &[Material]) -> CatalogSummary {
    let mut material_types = Vec::new();
    let mut conductivity_levels = Vec::new();
    for material in materials {
        if !material_types.contains(&material.typical_form) {
            material_types.push(material.typical_form);
        }
        if !conductivity_levels.contains(&material.electrical_conductivity_level) {
            conductivity_levels.push(material.electrical_conductivity_level);
        }
    }

    let cost_range = materials
        .iter()
        .map(|m| m.relative_cost)
        .fold(None::<ValueRange<u8>>, |acc, cost| {
            Some(match acc {
                None => ValueRange { min: cost, max: cost },
                Some(r) => ValueRange {
                    min: r.min.min(cost),
                    max: r.max.max(cost),
                },
            })
        });

    let hardness_range = materials
        .iter()
        .map(|m| m.hardness)
        .fold(None::<ValueRange<f64>>, |acc, hardness| {
            Some(match acc {
                None => ValueRange {
                    min: hardness,
                    max: hardness,
                },
                Some(r) => ValueRange {
                    min: r.min.min(hardness),
                    max: r.max.max(hardness),
                },
            })
        });

    CatalogSummary {
        total_materials: materials.len(),
        material_types,
        conductivity_levels,
        cost_range,
        hardness_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_materials;
    use crate::scoring::RangeCriterion;

    fn sample_material(id: &str, hardness: f64) -> Material {
        Material {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: format!("Material {}", id),
            hardness,
            young_modulus: 100.0,
            tensile_strength: 500.0,
            compressive_strength: 800.0,
            density: 2.0,
            melting_point: 3500.0,
            temperature_resistance: 600.0,
            electrical_conductivity: 1000.0,
            electrical_conductivity_level: ConductivityLevel::Low,
            thermal_conductivity: 10.0,
            relative_cost: 3,
            typical_form: TypicalForm::Powder,
            typical_applications: vec![],
        }
    }

    fn hardness(min: Option<f64>, max: Option<f64>, priority: Option<i32>) -> SearchCriteria {
        SearchCriteria {
            hardness: RangeCriterion { min, max, priority },
            ..Default::default()
        }
    }

    #[test]
    fn test_two_material_example() {
        let catalog = Catalog::new(vec![sample_material("b", 3.0), sample_material("a", 7.0)]);
        let engine = RecommendationEngine::new(&catalog);
        let result = engine.recommend(&hardness(Some(5.0), None, Some(3)));

        assert_eq!(result.total_materials_evaluated, 2);
        let top = &result.top_recommendations;
        assert_eq!(top.len(), 2);

        assert_eq!(top[0].material.id, "a");
        assert_eq!(top[0].score, 3);
        assert_eq!(top[0].fulfillment_percentage, 100.0);
        assert_eq!(top[0].matched_criteria, vec!["Dureza: 7"]);
        assert!(top[0].missed_criteria.is_empty());

        assert_eq!(top[1].material.id, "b");
        assert_eq!(top[1].score, 0);
        assert_eq!(top[1].fulfillment_percentage, 0.0);
        assert!(top[1].matched_criteria.is_empty());
        assert_eq!(top[1].missed_criteria, vec!["Dureza: 3 (requerido: 5 - max)"]);
    }

    #[test]
    fn test_missed_uses_min_token_when_only_max_set() {
        let material = sample_material("a", 7.0);
        let result = evaluate_material(&material, &hardness(None, Some(4.5), None));
        assert_eq!(result.missed_criteria, vec!["Dureza: 7 (requerido: min - 4.5)"]);
    }

    #[test]
    fn test_min_and_max_count_as_one_constraint() {
        let material = sample_material("a", 7.0);
        let result = evaluate_material(&material, &hardness(Some(1.0), Some(6.0), Some(2)));
        assert_eq!(result.score, 0);
        assert_eq!(result.fulfillment_percentage, 0.0);
        assert_eq!(result.missed_criteria, vec!["Dureza: 7 (requerido: 1 - 6)"]);

        let result = evaluate_material(&material, &hardness(Some(1.0), Some(7.0), Some(2)));
        assert_eq!(result.score, 2);
        assert_eq!(result.fulfillment_percentage, 100.0);
    }

    #[test]
    fn test_zero_bound_is_a_real_bound() {
        let material = sample_material("a", 7.0);
        let result = evaluate_material(&material, &hardness(Some(0.0), Some(5.0), None));
        assert_eq!(result.missed_criteria, vec!["Dureza: 7 (requerido: 0 - 5)"]);
    }

    #[test]
    fn test_empty_criteria_preserves_catalog_order() {
        let catalog = Catalog::builtin();
        let engine = RecommendationEngine::new(&catalog);
        let ranked = engine.rank(&SearchCriteria::default());

        assert_eq!(ranked.len(), catalog.len());
        for (result, material) in ranked.iter().zip(catalog.materials()) {
            assert_eq!(result.material.id, material.id);
            assert_eq!(result.score, 0);
            assert_eq!(result.fulfillment_percentage, 0.0);
            assert!(result.matched_criteria.is_empty());
            assert!(result.missed_criteria.is_empty());
        }

        let result = engine.recommend(&SearchCriteria::default());
        let ids: Vec<_> = result.top_recommendations.iter().map(|r| r.material.id.as_str()).collect();
        let expected: Vec<_> = catalog.materials()[..3].iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_priority_without_constraint_has_no_effect() {
        let material = sample_material("a", 7.0);
        let result = evaluate_material(&material, &hardness(None, None, Some(5)));
        assert_eq!(result.score, 0);
        assert_eq!(result.fulfillment_percentage, 0.0);
        assert!(result.matched_criteria.is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            sample_material("first", 5.0),
            sample_material("low", 1.0),
            sample_material("second", 6.0),
            sample_material("third", 9.0),
        ]);
        let engine = RecommendationEngine::new(&catalog);
        let ranked = engine.rank(&hardness(Some(4.0), None, None));
        let ids: Vec<_> = ranked.iter().map(|r| r.material.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third", "low"]);
    }

    #[test]
    fn test_top_recommendations_capped() {
        let catalog = Catalog::builtin();
        let engine = RecommendationEngine::new(&catalog);
        let result = engine.recommend(&hardness(Some(1.0), None, None));
        assert_eq!(result.top_recommendations.len(), TOP_RECOMMENDATIONS);
        assert_eq!(result.total_materials_evaluated, catalog.len());
    }

    #[test]
    fn test_small_catalog_returns_all() {
        let catalog = Catalog::new(vec![sample_material("only", 5.0)]);
        let result = RecommendationEngine::new(&catalog).recommend(&SearchCriteria::default());
        assert_eq!(result.top_recommendations.len(), 1);

        let empty = Catalog::new(vec![]);
        let result = RecommendationEngine::new(&empty).recommend(&hardness(Some(1.0), None, None));
        assert!(result.top_recommendations.is_empty());
        assert_eq!(result.total_materials_evaluated, 0);
    }

    #[test]
    fn test_search_criteria_echoed() {
        let catalog = Catalog::builtin();
        let criteria = hardness(Some(2.0), Some(8.0), Some(4));
        let result = RecommendationEngine::new(&catalog).recommend(&criteria);
        assert_eq!(result.search_criteria, criteria);
    }

    #[test]
    fn test_cost_ceiling_inclusive() {
        let mut material = sample_material("a", 5.0);
        material.relative_cost = 2;
        let criteria = SearchCriteria {
            relative_cost_max: Some(2),
            cost_priority: Some(4),
            ..Default::default()
        };
        let result = evaluate_material(&material, &criteria);
        assert_eq!(result.score, 4);
        assert_eq!(result.matched_criteria, vec!["Costo Relativo: 2"]);

        material.relative_cost = 3;
        let result = evaluate_material(&material, &criteria);
        assert_eq!(result.score, 0);
        assert_eq!(result.missed_criteria, vec!["Costo Relativo: 3 (máximo: 2)"]);
    }

    #[test]
    fn test_zero_cost_ceiling_is_a_constraint() {
        let material = sample_material("a", 5.0);
        let criteria = SearchCriteria {
            relative_cost_max: Some(0),
            ..Default::default()
        };
        let result = evaluate_material(&material, &criteria);
        assert_eq!(result.score, 0);
        assert_eq!(result.fulfillment_percentage, 0.0);
        assert_eq!(result.missed_criteria, vec!["Costo Relativo: 3 (máximo: 0)"]);
    }

    #[test]
    fn test_categorical_exact_match() {
        let material = sample_material("a", 5.0);
        let criteria = SearchCriteria {
            electrical_conductivity_level: Some(ConductivityLevel::Low),
            typical_form: Some(TypicalForm::Fiber),
            form_priority: Some(5),
            ..Default::default()
        };
        let result = evaluate_material(&material, &criteria);
        assert_eq!(result.score, 1);
        assert_eq!(result.fulfillment_percentage, 50.0);
        assert_eq!(result.matched_criteria, vec!["Nivel de Conductividad: Conductor Bajo"]);
        assert_eq!(result.missed_criteria, vec!["Forma: Polvo (requerido: Fibra)"]);
    }

    #[test]
    fn test_level_weighted_by_electrical_priority() {
        let material = sample_material("a", 5.0);
        let criteria = SearchCriteria {
            electrical_conductivity: RangeCriterion {
                priority: Some(4),
                ..Default::default()
            },
            electrical_conductivity_level: Some(ConductivityLevel::Low),
            ..Default::default()
        };
        let result = evaluate_material(&material, &criteria);
        assert_eq!(result.score, 4);
        assert_eq!(result.fulfillment_percentage, 100.0);
    }

    #[test]
    fn test_evaluation_order() {
        let material = sample_material("a", 5.0);
        // Every constraint fails so every description lands in the missed list
        let impossible = RangeCriterion {
            min: Some(1e12),
            ..Default::default()
        };
        let criteria = SearchCriteria {
            hardness: impossible,
            young_modulus: impossible,
            tensile_strength: impossible,
            compressive_strength: impossible,
            density: impossible,
            melting_point: impossible,
            temperature_resistance: impossible,
            electrical_conductivity: impossible,
            thermal_conductivity: impossible,
            electrical_conductivity_level: Some(ConductivityLevel::Extreme),
            relative_cost_max: Some(1),
            typical_form: Some(TypicalForm::Tube),
            ..Default::default()
        };
        let result = evaluate_material(&material, &criteria);
        let labels: Vec<_> = result
            .missed_criteria
            .iter()
            .map(|s| s.split(':').next().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Dureza",
                "Módulo de Young",
                "Resistencia a la Tracción",
                "Resistencia a la Compresión",
                "Densidad",
                "Punto de Fusión",
                "Resistencia a la Temperatura",
                "Conductividad Eléctrica",
                "Conductividad Térmica",
                "Nivel de Conductividad",
                "Costo Relativo",
                "Forma",
            ]
        );
        assert_eq!(result.score, 0);
        assert_eq!(result.fulfillment_percentage, 0.0);
    }

    #[test]
    fn test_partial_fulfillment() {
        let material = sample_material("a", 5.0);
        let criteria = SearchCriteria {
            hardness: RangeCriterion {
                min: Some(4.0),
                priority: Some(2),
                ..Default::default()
            },
            density: RangeCriterion {
                max: Some(1.0),
                ..Default::default()
            },
            thermal_conductivity: RangeCriterion {
                min: Some(5.0),
                max: Some(20.0),
                priority: Some(5),
            },
            ..Default::default()
        };
        let result = evaluate_material(&material, &criteria);
        assert_eq!(result.score, 7);
        assert!((result.fulfillment_percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.matched_criteria, vec!["Dureza: 5", "Conductividad Térmica: 10"]);
        assert_eq!(result.missed_criteria, vec!["Densidad: 2 (requerido: min - 1)"]);
    }

    #[test]
    fn test_out_of_range_priority_used_verbatim() {
        let material = sample_material("a", 5.0);
        let result = evaluate_material(&material, &hardness(Some(1.0), None, Some(9)));
        assert_eq!(result.score, 9);
    }

    #[test]
    fn test_fulfillment_and_score_bounds_on_builtin() {
        let catalog = Catalog::builtin();
        let engine = RecommendationEngine::new(&catalog);
        let criteria_set = vec![
            SearchCriteria::default(),
            hardness(Some(5.0), None, Some(5)),
            SearchCriteria {
                thermal_conductivity: RangeCriterion {
                    min: Some(100.0),
                    priority: Some(3),
                    ..Default::default()
                },
                relative_cost_max: Some(3),
                typical_form: Some(TypicalForm::Tube),
                electrical_conductivity_level: Some(ConductivityLevel::High),
                ..Default::default()
            },
        ];
        for criteria in &criteria_set {
            let ranked = engine.rank(criteria);
            for result in &ranked {
                assert!((0.0..=100.0).contains(&result.fulfillment_percentage));
                assert!(result.score >= 0);
                assert_eq!(
                    result.matched_criteria.len() + result.missed_criteria.len(),
                    criteria.constraint_count()
                );
            }
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let catalog = Catalog::builtin();
        let engine = RecommendationEngine::new(&catalog);
        let criteria = SearchCriteria {
            tensile_strength: RangeCriterion {
                min: Some(1000.0),
                priority: Some(4),
                ..Default::default()
            },
            relative_cost_max: Some(4),
            ..Default::default()
        };
        assert_eq!(engine.recommend(&criteria), engine.recommend(&criteria));
    }

    #[test]
    fn test_recommend_does_not_mutate_catalog() {
        let catalog = Catalog::builtin();
        let before = catalog.clone();
        let engine = RecommendationEngine::new(&catalog);
        let _ = engine.recommend(&hardness(Some(3.0), Some(9.0), Some(2)));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_summary_ranges() {
        let catalog = Catalog::new(vec![
            sample_material("a", 2.0),
            sample_material("b", 9.0),
            sample_material("c", 5.0),
        ]);
        let summary = RecommendationEngine::new(&catalog).catalog_summary();
        assert_eq!(summary.total_materials, 3);
        assert_eq!(summary.hardness_range, Some(ValueRange { min: 2.0, max: 9.0 }));
        assert_eq!(summary.cost_range, Some(ValueRange { min: 3, max: 3 }));
    }

    #[test]
    fn test_summary_distinct_labels_in_first_seen_order() {
        let mut a = sample_material("a", 1.0);
        a.typical_form = TypicalForm::Tube;
        a.electrical_conductivity_level = ConductivityLevel::Extreme;
        let mut b = sample_material("b", 1.0);
        b.typical_form = TypicalForm::Fiber;
        let mut c = sample_material("c", 1.0);
        c.typical_form = TypicalForm::Tube;
        c.relative_cost = 1;

        let catalog = Catalog::new(vec![a, b, c]);
        let summary = RecommendationEngine::new(&catalog).catalog_summary();
        assert_eq!(summary.material_types, vec![TypicalForm::Tube, TypicalForm::Fiber]);
        assert_eq!(
            summary.conductivity_levels,
            vec![ConductivityLevel::Extreme, ConductivityLevel::Low]
        );
        assert_eq!(summary.cost_range, Some(ValueRange { min: 1, max: 3 }));
    }

    #[test]
    fn test_summary_empty_catalog() {
        let catalog = Catalog::new(vec![]);
        let summary = RecommendationEngine::new(&catalog).catalog_summary();
        assert_eq!(summary.total_materials, 0);
        assert!(summary.material_types.is_empty());
        assert!(summary.cost_range.is_none());
        assert!(summary.hardness_range.is_none());
    }

    #[test]
    fn test_builtin_high_thermal_search() {
        let catalog = Catalog::new(builtin_materials());
        let engine = RecommendationEngine::new(&catalog);
        let criteria = SearchCriteria {
            thermal_conductivity: RangeCriterion {
                min: Some(1000.0),
                priority: Some(5),
                ..Default::default()
            },
            typical_form: Some(TypicalForm::Sheet),
            ..Default::default()
        };
        let result = engine.recommend(&criteria);
        // Graphene and pyrolytic graphite are sheets above 1000 W/m·K
        let top: Vec<_> = result.top_recommendations.iter().map(|r| r.material.id.as_str()).collect();
        assert_eq!(&top[..2], &["graphene", "pyrolytic-graphite"]);
        assert_eq!(result.top_recommendations[0].score, 6);
        assert_eq!(result.top_recommendations[0].fulfillment_percentage, 100.0);
    }

    #[test]
    fn test_tiny_values_use_exponent_notation() {
        let catalog = Catalog::new(builtin_materials());
        let diamond = &catalog.materials()[0];
        let criteria = SearchCriteria {
            electrical_conductivity: RangeCriterion {
                min: Some(1e-8),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = evaluate_material(diamond, &criteria);
        assert_eq!(
            result.missed_criteria,
            vec!["Conductividad Eléctrica: 1e-13 (requerido: 1e-8 - max)"]
        );
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecommendationEngine<'static>>();
        assert_send_sync::<SearchResult<'static>>();
    }
}
