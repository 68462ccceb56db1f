use std::cmp::Ordering;

use tracing::warn;

use crate::ensemble::{FeatureFrame, ModelBundle, Predictor};
use crate::pipeline::constants::{PRIMARY_WEIGHT, SECONDARY_WEIGHT};
use crate::pipeline::scoring::ScoredFood;

/// Ranked candidates plus a flag marking rule-score fallback.
///
/// `degraded` is diagnostic only; a missing or failing model bundle never
/// fails the pipeline.
#[derive(Debug)]
pub struct RankOutcome {
    pub ranked: Vec<ScoredFood>,
    pub degraded: bool,
}

/// Feature frame over the scored candidates: the macro schema and the
/// deviation schema side by side, selected per model by name.
fn build_frame(candidates: &[ScoredFood]) -> FeatureFrame {
    let mut frame = FeatureFrame::new(candidates.len());
    frame.insert(
        "energy_kcal",
        candidates.iter().map(|c| c.item.energy_kcal).collect(),
    );
    frame.insert(
        "protein_g",
        candidates.iter().map(|c| c.item.protein_g).collect(),
    );
    frame.insert("fat_g", candidates.iter().map(|c| c.item.fat_g).collect());
    frame.insert("carb_g", candidates.iter().map(|c| c.item.carb_g).collect());
    frame.insert(
        "energy_score",
        candidates.iter().map(|c| c.energy_score).collect(),
    );
    frame.insert(
        "macro_score",
        candidates.iter().map(|c| c.macro_score).collect(),
    );
    frame.insert(
        "rule_score",
        candidates.iter().map(|c| c.rule_score).collect(),
    );
    frame
}

/// One regressor's predictions, falling back to the rule scores when the
/// model cannot produce them.
fn predict_or_fallback(
    role: &str,
    model: &(dyn Predictor + Send + Sync),
    frame: &FeatureFrame,
    candidates: &[ScoredFood],
    degraded: &mut bool,
) -> Vec<f64> {
    match model.predict(frame) {
        Ok(preds) if preds.len() == candidates.len() => preds,
        Ok(preds) => {
            warn!(
                role,
                got = preds.len(),
                expected = candidates.len(),
                "regressor returned wrong row count, using rule scores"
            );
            *degraded = true;
            candidates.iter().map(|c| c.rule_score).collect()
        }
        Err(e) => {
            warn!(role, error = %e, "regressor failed, using rule scores");
            *degraded = true;
            candidates.iter().map(|c| c.rule_score).collect()
        }
    }
}

/// Combine the two regressors' predictions (0.5/0.5) into `final_score`
/// and sort ascending: lower is better, matching the rule score.
///
/// With no bundle, `final_score == rule_score` exactly. Ties break by name
/// so the ordering is deterministic.
pub fn rank(mut candidates: Vec<ScoredFood>, bundle: Option<&ModelBundle>) -> RankOutcome {
    let mut degraded = false;

    match bundle {
        Some(bundle) => {
            let frame = build_frame(&candidates);
            let primary = predict_or_fallback(
                "primary",
                bundle.primary.as_ref(),
                &frame,
                &candidates,
                &mut degraded,
            );
            let secondary = predict_or_fallback(
                "secondary",
                bundle.secondary.as_ref(),
                &frame,
                &candidates,
                &mut degraded,
            );

            for (i, candidate) in candidates.iter_mut().enumerate() {
                candidate.final_score =
                    PRIMARY_WEIGHT * primary[i] + SECONDARY_WEIGHT * secondary[i];
            }
        }
        None => {
            warn!("no model bundle available, ranking by rule score");
            degraded = true;
            for candidate in candidates.iter_mut() {
                candidate.final_score = candidate.rule_score;
            }
        }
    }

    candidates.sort_by(|a, b| {
        a.final_score
            .partial_cmp(&b.final_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.item.name.cmp(&b.item.name))
    });

    RankOutcome {
        ranked: candidates,
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::{LinearModel, ModelError};
    use crate::models::{FoodCategory, FoodItem};
    use crate::pipeline::scoring::score;

    fn items() -> Vec<FoodItem> {
        ["Tempe", "Nasi putih", "Bayam"]
            .iter()
            .enumerate()
            .map(|(i, name)| FoodItem {
                name: name.to_string(),
                group: String::new(),
                category: FoodCategory::Other,
                energy_kcal: 100.0 + 100.0 * i as f64,
                protein_g: 10.0,
                fat_g: 5.0,
                carb_g: 20.0,
                halal: None,
                allergy_tags: None,
                disease_tags: None,
                sodium_mg: None,
                sugar_g: None,
            })
            .collect()
    }

    fn linear(features: &[&str], weights: &[f64]) -> LinearModel {
        LinearModel {
            features: features.iter().map(|s| s.to_string()).collect(),
            weights: weights.to_vec(),
            intercept: 0.0,
        }
    }

    #[test]
    fn test_fallback_without_bundle() {
        let scored = score(items(), 2100.0);
        let outcome = rank(scored, None);

        assert!(outcome.degraded);
        for c in &outcome.ranked {
            assert_eq!(c.final_score, c.rule_score);
        }
        // Sorted ascending
        for pair in outcome.ranked.windows(2) {
            assert!(pair[0].final_score <= pair[1].final_score);
        }
    }

    #[test]
    fn test_ensemble_combines_predictions() {
        let scored = score(items(), 2100.0);
        let bundle = ModelBundle::new(
            // Predicts 2x the rule score
            Box::new(linear(&["rule_score"], &[2.0])),
            // Predicts 0 for everything
            Box::new(linear(&["rule_score"], &[0.0])),
        );

        let outcome = rank(scored, Some(&bundle));
        assert!(!outcome.degraded);
        for c in &outcome.ranked {
            // 0.5*2x + 0.5*0 = rule_score
            assert!((c.final_score - c.rule_score).abs() < 1e-9);
        }
    }

    struct FailingModel {
        features: Vec<String>,
    }

    impl Predictor for FailingModel {
        fn required_features(&self) -> &[String] {
            &self.features
        }
        fn predict(&self, _frame: &FeatureFrame) -> Result<Vec<f64>, ModelError> {
            Err(ModelError::NoFeatures)
        }
    }

    #[test]
    fn test_failing_model_degrades_not_fails() {
        let scored = score(items(), 2100.0);
        let bundle = ModelBundle::new(
            Box::new(FailingModel { features: vec![] }),
            Box::new(linear(&["rule_score"], &[1.0])),
        );

        let outcome = rank(scored, Some(&bundle));
        assert!(outcome.degraded);
        // Failing primary contributes the rule score itself, so the ensemble
        // still equals the rule score
        for c in &outcome.ranked {
            assert!((c.final_score - c.rule_score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_models_with_unknown_features_get_zero_columns() {
        let scored = score(items(), 2100.0);
        let bundle = ModelBundle::new(
            Box::new(linear(&["rule_score", "not_a_column"], &[1.0, 5.0])),
            Box::new(linear(&["rule_score"], &[1.0])),
        );

        let outcome = rank(scored, Some(&bundle));
        // Unknown column injected as zeros: both models predict rule_score
        assert!(!outcome.degraded);
        for c in &outcome.ranked {
            assert!((c.final_score - c.rule_score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic_tie_break() {
        let mut a = items();
        for it in a.iter_mut() {
            it.energy_kcal = 100.0;
        }
        let scored = score(a, 2100.0);
        let outcome = rank(scored, None);

        let names: Vec<&str> = outcome.ranked.iter().map(|c| c.item.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
