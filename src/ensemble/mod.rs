use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::{PlanError, Result};

/// Column names of the macro-nutrient feature schema.
pub const MACRO_FEATURES: [&str; 4] = ["energy_kcal", "protein_g", "fat_g", "carb_g"];

/// Column names of the rule-derived deviation feature schema.
pub const DEVIATION_FEATURES: [&str; 3] = ["energy_score", "macro_score", "rule_score"];

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model declares no features")]
    NoFeatures,

    #[error("weight count {weights} does not match feature count {features}")]
    ShapeMismatch { weights: usize, features: usize },

    #[error("prediction produced a non-finite value for row {0}")]
    NonFinite(usize),
}

/// Named columns of equal length, one row per candidate.
///
/// Models pull columns by name; a column a model requires but the frame
/// lacks is injected as zeros rather than failing the prediction.
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    rows: usize,
    columns: HashMap<String, Vec<f64>>,
}

impl FeatureFrame {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Insert a column. Panics in debug builds on length mismatch; callers
    /// construct frames from a single candidate slice so lengths agree.
    pub fn insert(&mut self, name: &str, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.rows);
        self.columns.insert(name.to_string(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Materialize the named columns row-major, zero-filling any column the
    /// frame does not carry.
    pub fn select(&self, names: &[String]) -> Vec<Vec<f64>> {
        (0..self.rows)
            .map(|row| {
                names
                    .iter()
                    .map(|name| {
                        self.columns
                            .get(name)
                            .map(|col| col[row])
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect()
    }
}

/// A trained regressor exposed behind the single capability the ranker
/// needs: batch prediction over a feature frame.
pub trait Predictor {
    /// Feature names this model was fit on, in order.
    fn required_features(&self) -> &[String];

    /// Predict one value per frame row.
    fn predict(&self, frame: &FeatureFrame) -> std::result::Result<Vec<f64>, ModelError>;
}

/// Linear regression model: `intercept + w . x`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub features: Vec<String>,
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    fn validate(&self) -> std::result::Result<(), ModelError> {
        if self.features.is_empty() {
            return Err(ModelError::NoFeatures);
        }
        if self.weights.len() != self.features.len() {
            return Err(ModelError::ShapeMismatch {
                weights: self.weights.len(),
                features: self.features.len(),
            });
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn required_features(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, frame: &FeatureFrame) -> std::result::Result<Vec<f64>, ModelError> {
        self.validate()?;

        let rows = frame.select(&self.features);
        let mut out = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let value: f64 = self.intercept
                + row
                    .iter()
                    .zip(&self.weights)
                    .map(|(x, w)| x * w)
                    .sum::<f64>();
            if !value.is_finite() {
                return Err(ModelError::NonFinite(idx));
            }
            out.push(value);
        }
        Ok(out)
    }
}

/// The two independently trained regressors used by the ranker.
///
/// Loaded once per process and shared read-only across planning requests.
pub struct ModelBundle {
    pub primary: Box<dyn Predictor + Send + Sync>,
    pub secondary: Box<dyn Predictor + Send + Sync>,
}

impl ModelBundle {
    pub fn new(
        primary: Box<dyn Predictor + Send + Sync>,
        secondary: Box<dyn Predictor + Send + Sync>,
    ) -> Self {
        Self { primary, secondary }
    }
}

#[derive(Debug, Deserialize)]
struct BundleFile {
    primary: LinearModel,
    secondary: LinearModel,
}

/// Load a model bundle from a JSON file keyed `primary`/`secondary`.
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<ModelBundle> {
    let content = std::fs::read_to_string(path)?;
    let file: BundleFile = serde_json::from_str(&content)?;

    for (role, model) in [("primary", &file.primary), ("secondary", &file.secondary)] {
        model
            .validate()
            .map_err(|e| PlanError::InvalidInput(format!("{role} model: {e}")))?;
        debug!(role, features = ?model.features, "loaded regressor");
    }

    Ok(ModelBundle::new(
        Box::new(file.primary),
        Box::new(file.secondary),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn frame_with(name: &str, values: Vec<f64>) -> FeatureFrame {
        let mut frame = FeatureFrame::new(values.len());
        frame.insert(name, values);
        frame
    }

    #[test]
    fn test_linear_model_predicts() {
        let model = LinearModel {
            features: vec!["rule_score".to_string()],
            weights: vec![2.0],
            intercept: 1.0,
        };
        let frame = frame_with("rule_score", vec![0.5, 1.5]);

        let preds = model.predict(&frame).unwrap();
        assert_eq!(preds, vec![2.0, 4.0]);
    }

    #[test]
    fn test_missing_feature_injected_as_zero() {
        let model = LinearModel {
            features: vec!["rule_score".to_string(), "unknown_col".to_string()],
            weights: vec![1.0, 10.0],
            intercept: 0.0,
        };
        let frame = frame_with("rule_score", vec![0.25]);

        // unknown_col contributes 0, not an error
        let preds = model.predict(&frame).unwrap();
        assert_eq!(preds, vec![0.25]);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let model = LinearModel {
            features: vec!["a".to_string(), "b".to_string()],
            weights: vec![1.0],
            intercept: 0.0,
        };
        let frame = frame_with("a", vec![1.0]);
        assert!(matches!(
            model.predict(&frame),
            Err(ModelError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_load_bundle_roundtrip() {
        let json = r#"{
            "primary": {"features": ["energy_kcal", "protein_g", "fat_g", "carb_g"],
                        "weights": [0.001, 0.01, 0.01, 0.005], "intercept": 0.1},
            "secondary": {"features": ["energy_score", "macro_score", "rule_score"],
                          "weights": [0.4, 0.3, 0.3]}
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let bundle = load_bundle(file.path()).unwrap();
        assert_eq!(bundle.primary.required_features().len(), 4);
        assert_eq!(bundle.secondary.required_features().len(), 3);
    }

    #[test]
    fn test_load_bundle_rejects_bad_shape() {
        let json = r#"{
            "primary": {"features": ["a"], "weights": [1.0, 2.0]},
            "secondary": {"features": ["b"], "weights": [1.0]}
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(load_bundle(file.path()).is_err());
    }
}
