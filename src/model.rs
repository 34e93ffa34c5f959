// 🤖 Model Boundary
// The trained price model is a black box behind one trait

use crate::encoder::{FeatureSchema, FeatureVector};
use crate::error::{LoadError, PredictError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

// ============================================================================
// PREDICTOR TRAIT
// ============================================================================

/// PricePredictor - anything that turns encoded properties into prices
///
/// Implementations only promise to accept vectors shaped like the names
/// returned by `input_features`; the encoder side checks that contract once
/// via [`check_schema`].
pub trait PricePredictor: Send + Sync {
    /// One estimate per input vector, in input order
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, PredictError>;

    /// Feature names in the order the model consumes them
    fn input_features(&self) -> &[String];

    /// Unit the estimates are denominated in
    fn units(&self) -> &str {
        "Lakhs"
    }
}

/// Verify the encoder layout matches what the model was trained on.
///
/// A mismatch would not crash at predict time, it would silently feed a
/// region indicator into the wrong coefficient.
pub fn check_schema(schema: &FeatureSchema, model: &dyn PricePredictor) -> Result<(), LoadError> {
    let ours = schema.names();
    let theirs = model.input_features();

    for position in 0..ours.len().max(theirs.len()) {
        let actual = ours.get(position);
        let expected = theirs.get(position);
        if actual != expected {
            return Err(LoadError::SchemaMismatch {
                position,
                expected: expected.cloned().unwrap_or_else(|| "<end>".to_string()),
                actual: actual.cloned().unwrap_or_else(|| "<end>".to_string()),
            });
        }
    }

    Ok(())
}

// ============================================================================
// LINEAR MODEL ARTIFACT
// ============================================================================

/// On-disk shape of an exported linear regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_units() -> String {
    "Lakhs".to_string()
}

/// LinearModel - `intercept + Σ coefficient_i · x_i`
#[derive(Debug, Clone)]
pub struct LinearModel {
    artifact: ModelArtifact,
    /// Only set when the artifact came from a file
    fingerprint: Option<String>,
}

impl LinearModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, LoadError> {
        if artifact.feature_names.len() != artifact.coefficients.len() {
            return Err(LoadError::ArtifactShape {
                names: artifact.feature_names.len(),
                coefficients: artifact.coefficients.len(),
            });
        }

        Ok(LinearModel {
            artifact,
            fingerprint: None,
        })
    }

    /// Load and validate a JSON model artifact
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Artifact {
                path: path.to_path_buf(),
                source,
            })?;

        let mut model = Self::from_artifact(artifact)?;
        model.fingerprint = Some(fingerprint(&bytes));

        info!(
            path = %path.display(),
            features = model.artifact.feature_names.len(),
            fingerprint = model.fingerprint().unwrap_or_default(),
            "loaded model artifact"
        );

        Ok(model)
    }

    /// SHA-256 of the artifact file bytes, hex encoded
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

impl PricePredictor for LinearModel {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, PredictError> {
        if batch.is_empty() {
            return Err(PredictError::EmptyBatch);
        }

        let expected = self.artifact.coefficients.len();
        batch
            .iter()
            .map(|vector| {
                if vector.len() != expected {
                    return Err(PredictError::ShapeMismatch {
                        expected,
                        actual: vector.len(),
                    });
                }

                let estimate = self.artifact.intercept
                    + vector
                        .values()
                        .iter()
                        .zip(&self.artifact.coefficients)
                        .map(|(x, w)| x * w)
                        .sum::<f64>();

                if estimate.is_finite() {
                    Ok(estimate)
                } else {
                    Err(PredictError::NonFinite)
                }
            })
            .collect()
    }

    fn input_features(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn units(&self) -> &str {
        &self.artifact.units
    }
}

fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
