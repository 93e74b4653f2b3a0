use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("failed to load model: {0}")]
    ModelLoad(#[source] ort::Error),
    #[error("inference failed: {0}")]
    Inference(#[source] ort::Error),
    #[error("unexpected model output shape: {0}")]
    OutputShape(String),
    #[error("vocabulary has {classes} entries but model produced {scores} scores")]
    VocabularyMismatch { classes: usize, scores: usize },
    #[error("model produced an empty score vector")]
    EmptyScores,
    #[error("failed to load labels: {0}")]
    Labels(#[from] std::io::Error),
    #[error("invalid preprocessing parameters: {0}")]
    Preprocess(String),
    #[error("model session mutex poisoned")]
    Poisoned,
}
