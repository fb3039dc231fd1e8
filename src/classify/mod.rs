//! Classifier boundary for the inference front end.
//!
//! The model itself is an opaque external collaborator: it receives a
//! fixed-size normalized pixel buffer and returns one probability per label.
//! This module owns everything on our side of that boundary: the fixed label
//! set, image preprocessing, and turning a raw probability vector into a
//! [`Prediction`].

use serde::Serialize;
use std::fmt;
use std::path::Path;

use image::imageops::FilterType;

use crate::error::CleansplitError;

/// Fixed, ordered label set shared with the dataset layout.
pub const CLASS_LABELS: [&str; 3] = ["Biodegradable", "Recyclable", "Trash"];

/// Model input width in pixels.
pub const INPUT_WIDTH: u32 = 224;
/// Model input height in pixels.
pub const INPUT_HEIGHT: u32 = 224;
/// RGB.
pub const INPUT_CHANNELS: usize = 3;

/// An external image classifier.
///
/// Implementations receive a row-major RGB buffer of
/// `INPUT_WIDTH * INPUT_HEIGHT * INPUT_CHANNELS` floats in `[0, 1]` and
/// return one probability per entry of [`CLASS_LABELS`], in the same order.
pub trait Classifier {
    fn predict(&self, pixels: &[f32]) -> Result<Vec<f32>, CleansplitError>;
}

/// One label with its probability.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LabelScore {
    pub label: &'static str,
    pub probability: f32,
}

/// Classification outcome for a single image.
#[derive(Clone, Debug, Serialize)]
pub struct Prediction {
    /// Highest-probability label.
    pub label: &'static str,
    /// Probability of `label`.
    pub confidence: f32,
    /// Full distribution, in label-set order.
    pub scores: Vec<LabelScore>,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({:.2} %)", self.label, self.confidence * 100.0)?;
        for score in &self.scores {
            writeln!(f, "  {:<14} {:>5.1} %", score.label, score.probability * 100.0)?;
        }
        Ok(())
    }
}

/// Decode an image and preprocess it into the model input buffer.
///
/// The image is resized to exactly `INPUT_WIDTH` x `INPUT_HEIGHT` (aspect
/// ratio is not preserved, matching the training pipeline) and scaled to
/// `[0, 1]`.
pub fn load_input(path: &Path) -> Result<Vec<f32>, CleansplitError> {
    let img = image::open(path).map_err(|source| CleansplitError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = img
        .resize_exact(INPUT_WIDTH, INPUT_HEIGHT, FilterType::Triangle)
        .to_rgb8();

    Ok(rgb.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect())
}

/// Run `classifier` on the image at `path`.
pub fn classify_image(
    path: &Path,
    classifier: &dyn Classifier,
) -> Result<Prediction, CleansplitError> {
    let input = load_input(path)?;
    let probs = classifier.predict(&input)?;
    prediction_from_probs(&probs)
}

/// Build a [`Prediction`] from a raw probability vector.
///
/// The vector must have exactly one entry per label. Ties resolve to the
/// earlier label in [`CLASS_LABELS`].
pub fn prediction_from_probs(probs: &[f32]) -> Result<Prediction, CleansplitError> {
    if probs.len() != CLASS_LABELS.len() {
        return Err(CleansplitError::BadPrediction {
            expected: CLASS_LABELS.len(),
            got: probs.len(),
        });
    }

    let mut best = 0;
    for (i, p) in probs.iter().enumerate() {
        if *p > probs[best] {
            best = i;
        }
    }

    let scores = CLASS_LABELS
        .iter()
        .zip(probs)
        .map(|(&label, &probability)| LabelScore { label, probability })
        .collect();

    Ok(Prediction {
        label: CLASS_LABELS[best],
        confidence: probs[best],
        scores,
    })
}
