use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, AppResult};

pub const MODEL_FILE: &str = "db_recommendation_model.json";
pub const SCALER_FILE: &str = "db_model_scaler.json";
pub const FEATURE_COLUMNS_FILE: &str = "db_feature_columns.json";

/// A trained model mapping a scaled feature row to a predicted rating
pub trait Regressor: Send + Sync {
    /// Number of features the model expects per row
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> f64;
}

/// A fitted transform bringing raw feature values into the model's range
pub trait Scaler: Send + Sync {
    fn n_features(&self) -> usize;

    fn transform(&self, features: &[f64]) -> Vec<f64>;
}

/// Linear regression: `intercept + Σ coefficient_i * x_i`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }
}

/// Standard scaler: `(x - mean) / scale`
///
/// A zero scale marks a constant feature in the training data and divides by 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let divisor = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / divisor
            })
            .collect()
    }
}

/// Model, scaler and feature-column order, loaded once and shared read-only
#[derive(Clone)]
pub struct RecommendationSystem {
    model: Arc<dyn Regressor>,
    scaler: Arc<dyn Scaler>,
    feature_columns: Vec<String>,
}

impl std::fmt::Debug for RecommendationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationSystem")
            .field("feature_columns", &self.feature_columns)
            .finish_non_exhaustive()
    }
}

impl RecommendationSystem {
    /// Assembles a system, checking the three parts agree on width
    pub fn new(
        model: Arc<dyn Regressor>,
        scaler: Arc<dyn Scaler>,
        feature_columns: Vec<String>,
    ) -> AppResult<Self> {
        if feature_columns.is_empty() {
            return Err(AppError::ArtifactUnavailable(
                "feature column list is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = feature_columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(AppError::ArtifactUnavailable(format!(
                "feature column {:?} is listed twice",
                duplicate
            )));
        }

        let width = feature_columns.len();
        if model.n_features() != width || scaler.n_features() != width {
            return Err(AppError::ArtifactUnavailable(format!(
                "width mismatch: {} feature columns, scaler expects {}, model expects {}",
                width,
                scaler.n_features(),
                model.n_features()
            )));
        }

        Ok(Self {
            model,
            scaler,
            feature_columns,
        })
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Scales an ordered feature row and returns the raw model output
    pub fn predict(&self, ordered_features: &[f64]) -> f64 {
        let scaled = self.scaler.transform(ordered_features);
        self.model.predict(&scaled)
    }
}

/// Loads the model, scaler and feature columns from `dir`
///
/// Any missing, unreadable or inconsistent artifact fails the whole load.
pub fn load_recommendation_system(dir: impl AsRef<Path>) -> AppResult<RecommendationSystem> {
    let dir = dir.as_ref();

    let model: LinearRegressor = read_artifact(dir, MODEL_FILE)?;
    check_finite(MODEL_FILE, model.coefficients.iter().chain([&model.intercept]))?;

    let scaler: StandardScaler = read_artifact(dir, SCALER_FILE)?;
    if scaler.mean.len() != scaler.scale.len() {
        return Err(AppError::ArtifactUnavailable(format!(
            "{}: mean has {} entries but scale has {}",
            SCALER_FILE,
            scaler.mean.len(),
            scaler.scale.len()
        )));
    }
    check_finite(SCALER_FILE, scaler.mean.iter().chain(&scaler.scale))?;

    let feature_columns: Vec<String> = read_artifact(dir, FEATURE_COLUMNS_FILE)?;

    let system = RecommendationSystem::new(Arc::new(model), Arc::new(scaler), feature_columns)?;

    tracing::info!(
        artifacts_dir = %dir.display(),
        feature_count = system.feature_columns().len(),
        "Loaded recommendation artifacts"
    );

    Ok(system)
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, file: &str) -> AppResult<T> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|e| {
        AppError::ArtifactUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        AppError::ArtifactUnavailable(format!("cannot decode {}: {}", path.display(), e))
    })
}

fn check_finite<'a>(file: &str, values: impl IntoIterator<Item = &'a f64>) -> AppResult<()> {
    if values.into_iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AppError::ArtifactUnavailable(format!(
            "{} contains non-finite parameters",
            file
        )))
    }
}
