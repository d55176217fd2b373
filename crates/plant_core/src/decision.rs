//! Turns a probability vector into the text shown to the user.

use crate::error::{ClassifierError, Result};
use crate::labels::LabelTable;

/// Below this confidence the prediction is reported as unpredictable.
pub const CONFIDENCE_THRESHOLD: f32 = 0.40;

pub const UNPREDICTABLE_MESSAGE: &str =
    "⚠️ Unpredictable: The uploaded item cannot be reliably classified.";

/// Classification decision for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Confidence too low to name a class.
    Unpredictable,
    /// Labeled with a class name.
    Label(String),
}

/// Outcome of a single classify request.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Index of the highest probability in the model output.
    pub index: usize,
    pub decision: Decision,
    /// Probability at `index`.
    pub confidence: f32,
}

impl Classification {
    pub fn display_text(&self) -> String {
        match &self.decision {
            Decision::Unpredictable => UNPREDICTABLE_MESSAGE.to_string(),
            Decision::Label(label) => format!(
                "🌿 Predicted Class: {label}\nConfidence Level: {}",
                format_confidence(self.confidence)
            ),
        }
    }
}

/// Confidence rounded to two decimals.
pub fn format_confidence(confidence: f32) -> String {
    format!("{confidence:.2}")
}

/// Index and value of the largest entry. Ties go to the first occurrence and
/// NaN never wins.
pub fn argmax(probabilities: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &p) in probabilities.iter().enumerate() {
        if p.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if p <= current => {}
            _ => best = Some((idx, p)),
        }
    }
    best
}

/// Applies the threshold rule to raw model output. The vector is not
/// validated beyond being non-empty; output with no comparable score (all
/// NaN) is unpredictable.
pub fn decide(probabilities: &[f32], labels: &LabelTable, threshold: f32) -> Result<Classification> {
    if probabilities.is_empty() {
        return Err(ClassifierError::EmptyOutput);
    }
    let Some((index, confidence)) = argmax(probabilities) else {
        return Ok(Classification {
            index: 0,
            decision: Decision::Unpredictable,
            confidence: f32::NAN,
        });
    };
    let decision = if confidence < threshold {
        Decision::Unpredictable
    } else {
        Decision::Label(labels.name(index))
    };
    Ok(Classification {
        index,
        decision,
        confidence,
    })
}
