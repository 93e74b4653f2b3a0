use crate::{config::ModelConfig, error::ClassifierError, model::ScoringModel};
use ndarray::{Array1, ArrayView4, Axis, Ix1};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::TensorRef,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// ONNX-backed scoring model.
///
/// Holds a small pool of sessions picked round-robin; the mutex serializes
/// each inference call so the model can be shared read-only across threads.
#[derive(Clone)]
pub struct OrtModel {
    sessions: Arc<Vec<Arc<Mutex<Session>>>>,
    counter: Arc<AtomicUsize>,
    output_name: String,
}

impl OrtModel {
    pub fn new(model_config: &ModelConfig) -> Result<Self, ClassifierError> {
        let num_instances = model_config.num_instances.max(1);
        let sessions = (0..num_instances)
            .map(|_| {
                let session = Session::builder()?
                    .with_optimization_level(GraphOptimizationLevel::Level3)?
                    .commit_from_file(model_config.get_path())?;
                Ok(Arc::new(Mutex::new(session)))
            })
            .collect::<Result<Vec<_>, ort::Error>>()
            .map_err(ClassifierError::ModelLoad)?;

        let output_name = {
            let session = sessions[0].lock().map_err(|_| ClassifierError::Poisoned)?;
            session
                .outputs()
                .first()
                .map(|output| output.name().to_string())
                .ok_or_else(|| {
                    ClassifierError::OutputShape("model graph has no outputs".to_string())
                })?
        };

        tracing::info!("Created {} ONNX sessions", num_instances);

        Ok(Self {
            sessions: Arc::new(sessions),
            counter: Arc::new(AtomicUsize::new(0)),
            output_name,
        })
    }
}

impl ScoringModel for OrtModel {
    fn forward(&self, input: ArrayView4<'_, f32>) -> Result<Array1<f32>, ClassifierError> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst) % self.sessions.len();
        let mut session = self.sessions[index]
            .lock()
            .map_err(|_| ClassifierError::Poisoned)?;

        tracing::debug!("Handling request with session {}", index);
        let owned_buffer;
        let input_view = if input.is_standard_layout() {
            input
        } else {
            owned_buffer = input.to_owned();
            owned_buffer.view()
        };

        let tensor_ref =
            TensorRef::from_array_view(input_view).map_err(ClassifierError::Inference)?;

        let outputs = session
            .run(ort::inputs![tensor_ref])
            .map_err(ClassifierError::Inference)?;

        let (shape, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(ClassifierError::Inference)?;

        let ix = shape.to_ixdyn();
        let array = ndarray::ArrayD::from_shape_vec(ix, data.to_vec())
            .map_err(|e| ClassifierError::OutputShape(e.to_string()))?;

        // Accept [1, N] batched logits or an already-squeezed [N].
        let logits = match array.ndim() {
            1 => array
                .into_dimensionality::<Ix1>()
                .map_err(|e| ClassifierError::OutputShape(e.to_string()))?,
            2 if array.shape()[0] == 1 => array
                .index_axis_move(Axis(0), 0)
                .into_dimensionality::<Ix1>()
                .map_err(|e| ClassifierError::OutputShape(e.to_string()))?,
            _ => {
                return Err(ClassifierError::OutputShape(format!(
                    "expected logits of shape [1, N], got {:?}",
                    array.shape()
                )))
            }
        };

        Ok(logits)
    }
}
