//! Inference backends. The classifier only sees the [`Inference`] trait.

use crate::error::Result;
use ndarray::Array4;

/// A trained model: one forward pass from a `(1, H, W, 3)` batch to a
/// probability vector. The output is returned as-is.
pub trait Inference: Send + Sync {
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

impl<F> Inference for F
where
    F: Fn(&Array4<f32>) -> Result<Vec<f32>> + Send + Sync,
{
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        self(input)
    }
}

#[cfg(feature = "ort")]
pub use self::onnx::OrtModel;

#[cfg(feature = "ort")]
mod onnx {
    use super::Inference;
    use crate::error::{ClassifierError, Result};
    use ndarray::{Array4, CowArray};
    use once_cell::sync::OnceCell;
    use ort::{
        GraphOptimizationLevel, SessionBuilder, environment::Environment, session::Session,
        tensor::OrtOwnedTensor, value::Value,
    };
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    static ORT_ENV: OnceCell<Arc<Environment>> = OnceCell::new();

    fn runtime_err(e: impl std::fmt::Display) -> ClassifierError {
        ClassifierError::Runtime(e.to_string())
    }

    fn environment() -> Result<Arc<Environment>> {
        ORT_ENV
            .get_or_try_init(|| {
                Environment::builder()
                    .with_name("plant-classifier")
                    .build()
                    .map(|env| env.into_arc())
            })
            .cloned()
            .map_err(runtime_err)
    }

    /// ONNX export of the trained model, run through ONNX Runtime.
    pub struct OrtModel {
        session: Mutex<Session>,
    }

    impl OrtModel {
        pub fn load(model_path: &Path) -> Result<Self> {
            if !model_path.exists() {
                return Err(ClassifierError::ModelMissing(model_path.to_path_buf()));
            }
            let env = environment()?;
            let session = SessionBuilder::new(&env)
                .map_err(runtime_err)?
                .with_optimization_level(GraphOptimizationLevel::Level1)
                .map_err(runtime_err)?
                .with_model_from_file(model_path)
                .map_err(runtime_err)?;
            tracing::info!("loaded model {}", model_path.display());
            Ok(Self {
                session: Mutex::new(session),
            })
        }
    }

    impl Inference for OrtModel {
        fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
            let session = self
                .session
                .lock()
                .map_err(|_| ClassifierError::Runtime("session lock poisoned".into()))?;
            let cow = CowArray::from(input.view().into_dyn());
            let value = Value::from_array(session.allocator(), &cow).map_err(runtime_err)?;
            let outputs: Vec<Value> = session.run(vec![value]).map_err(runtime_err)?;
            let Some(first) = outputs.first() else {
                return Err(ClassifierError::EmptyOutput);
            };
            let probs: OrtOwnedTensor<f32, _> = first.try_extract().map_err(runtime_err)?;
            let scores: Vec<f32> = probs.view().iter().copied().collect();
            Ok(scores)
        }
    }
}
