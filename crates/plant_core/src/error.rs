use std::path::PathBuf;

/// Errors raised while loading the model or classifying an image.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("model file is missing: {}", .0.display())]
    ModelMissing(PathBuf),

    #[error("inference runtime error: {0}")]
    Runtime(String),

    #[error("cannot read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("model returned an empty probability vector")]
    EmptyOutput,

    #[error("invalid label table: {0}")]
    Labels(String),

    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ClassifierError> = std::result::Result<T, E>;
