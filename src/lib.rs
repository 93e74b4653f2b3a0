mod classifier;
mod labels;
mod model;
mod ort_model;
mod postprocess;
mod preprocess;
mod registry;

pub mod config;
pub mod error;

pub use classifier::Classifier;
pub use labels::Vocabulary;
pub use model::ScoringModel;
pub use ort_model::OrtModel;
pub use postprocess::{argmax, softmax, Prediction};
pub use preprocess::Preprocessor;
pub use registry::{AccessLevel, Dependency, FunctionDescriptor, TensorSpec};
