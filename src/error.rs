// Error tiers for the dashboard
// Load errors are fatal at startup, predict errors are shown to the user

use std::path::PathBuf;
use thiserror::Error;

/// Anything that prevents the dashboard from building its context.
///
/// None of these are recoverable: without valid tables and a model whose
/// inputs match the feature schema, no view can be rendered.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{table} is missing required column '{column}' (found: {found})")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
        found: String,
    },

    #[error("{table} line {line}: column '{column}' has malformed value '{value}'")]
    MalformedValue {
        table: &'static str,
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("{table} line {line}: empty region key")]
    EmptyKey { table: &'static str, line: u64 },

    #[error("model artifact {path} is not valid JSON: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact declares {names} feature names but {coefficients} coefficients")]
    ArtifactShape { names: usize, coefficients: usize },

    #[error("model expects feature '{expected}' at position {position}, encoder produces '{actual}'")]
    SchemaMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}

/// Failure of a single prediction request.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("feature vector has {actual} values, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("prediction batch is empty")]
    EmptyBatch,

    #[error("model produced a non-finite estimate")]
    NonFinite,
}
