//! Plant/produce image classification: preprocessing, a pluggable inference
//! backend and the confidence rule that decides what the user sees.

pub mod config;
pub mod decision;
pub mod error;
pub mod labels;
pub mod model;
pub mod preprocess;

pub use config::AppConfig;
pub use decision::{
    CONFIDENCE_THRESHOLD, Classification, Decision, UNPREDICTABLE_MESSAGE, decide,
    format_confidence,
};
pub use error::{ClassifierError, Result};
pub use labels::{LabelTable, PLANT_LABELS};
pub use model::Inference;
#[cfg(feature = "ort")]
pub use model::OrtModel;
pub use preprocess::{MODEL_INPUT_SIZE, prepare_dynamic, prepare_image};

use image::DynamicImage;
use std::path::Path;

/// Preprocessing, one forward pass and the decision rule, bundled around an
/// injected model.
pub struct Classifier {
    model: Box<dyn Inference>,
    labels: LabelTable,
}

impl Classifier {
    pub fn new(model: Box<dyn Inference>, labels: LabelTable) -> Self {
        Self { model, labels }
    }

    /// Builds a classifier around `model` using the label file from `cfg`.
    pub fn with_config(model: Box<dyn Inference>, cfg: &AppConfig) -> Result<Self> {
        let labels = match &cfg.labels_path {
            Some(path) => LabelTable::from_file(path)?,
            None => LabelTable::builtin(),
        };
        Ok(Self::new(model, labels))
    }

    /// Loads the ONNX model named in `cfg`.
    #[cfg(feature = "ort")]
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let model = OrtModel::load(&cfg.model_path)?;
        Self::with_config(Box::new(model), cfg)
    }

    pub fn classify_path(&self, path: &Path) -> Result<Classification> {
        let input = prepare_image(path, MODEL_INPUT_SIZE)?;
        let result = self.run(&input)?;
        tracing::info!(
            "{} -> {:?} ({:.2})",
            path.display(),
            result.decision,
            result.confidence
        );
        Ok(result)
    }

    pub fn classify_image(&self, img: &DynamicImage) -> Result<Classification> {
        let input = prepare_dynamic(img, MODEL_INPUT_SIZE);
        self.run(&input)
    }

    fn run(&self, input: &ndarray::Array4<f32>) -> Result<Classification> {
        let probabilities = self.model.predict(input)?;
        tracing::debug!("model output: {:?}", probabilities);
        if probabilities.len() != self.labels.len() {
            tracing::warn!(
                "model returned {} scores for {} labels",
                probabilities.len(),
                self.labels.len()
            );
        }
        decide(&probabilities, &self.labels, CONFIDENCE_THRESHOLD)
    }
}
