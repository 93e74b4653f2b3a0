use crate::error::ClassifierError;
use ndarray::{Array1, ArrayView4};

/// A frozen, pretrained scoring function.
///
/// `input` is the preprocessed tensor with a leading batch dimension of 1;
/// implementations invoke the model exactly once and return the raw logit
/// vector with the batch dimension squeezed. Implementations must not mutate
/// model state between calls.
pub trait ScoringModel: Send + Sync + 'static {
    fn forward(&self, input: ArrayView4<'_, f32>) -> Result<Array1<f32>, ClassifierError>;
}
