use std::path::PathBuf;
use thiserror::Error;

use crate::split::SplitReport;

/// The main error type for cleansplit operations.
#[derive(Debug, Error)]
pub enum CleansplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Split ratios must sum to 1.0, got {train} + {val} + {test} = {sum}")]
    InvalidRatios {
        train: f64,
        val: f64,
        test: f64,
        sum: f64,
    },

    #[error("Split ratio out of range: {name} = {value} (must be within [0.0, 1.0])")]
    RatioOutOfRange { name: &'static str, value: f64 },

    #[error("Source is not a directory: {0}")]
    SourceNotADirectory(PathBuf),

    #[error("Class folders '{first}' and '{second}' both normalize to class name '{name}'")]
    ClassNameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Destination {path} already exists and is not empty (pass --force to replace it)")]
    DestinationNotEmpty { path: PathBuf },

    #[error("Split finished with {failure_count} file copy failure(s)")]
    SplitFailed {
        failure_count: usize,
        report: SplitReport,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Classifier returned {got} score(s), expected one per label ({expected})")]
    BadPrediction { expected: usize, got: usize },

    #[error("Failed to render JSON report: {0}")]
    ReportJson(#[from] serde_json::Error),
}
