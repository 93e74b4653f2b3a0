use crate::{
    config::Config,
    error::ClassifierError,
    labels::Vocabulary,
    model::ScoringModel,
    ort_model::OrtModel,
    postprocess::{argmax, softmax, Prediction},
    preprocess::Preprocessor,
};
use image::DynamicImage;
use ndarray::Axis;
use std::io::Cursor;

/// The parameterized inference pipeline: preprocessing, one forward pass,
/// postprocessing.
///
/// Immutable after `load`; share one instance read-only across threads.
pub struct Classifier<M: ScoringModel> {
    model: M,
    vocabulary: Vocabulary,
    preprocessor: Preprocessor,
}

impl Classifier<OrtModel> {
    /// Builds the pipeline handle once from configuration: model sessions,
    /// label vocabulary and preprocessing parameters.
    pub fn load(config: &Config) -> Result<Self, ClassifierError> {
        let model = OrtModel::new(&config.model)?;
        let vocabulary = Vocabulary::from_file(&config.labels.get_path())?;
        let preprocessor = Preprocessor::new(&config.model)?;

        tracing::info!("Loaded classifier with {} categories", vocabulary.len());

        Ok(Self::new(model, vocabulary, preprocessor))
    }
}

impl<M: ScoringModel> Classifier<M> {
    pub fn new(model: M, vocabulary: Vocabulary, preprocessor: Preprocessor) -> Self {
        Self {
            model,
            vocabulary,
            preprocessor,
        }
    }

    /// Classifies an image: returns the top category and its probability.
    pub fn predict(&self, image: &DynamicImage) -> Result<Prediction, ClassifierError> {
        let tensor = self.preprocessor.process(image);
        let batched = tensor.insert_axis(Axis(0));

        let logits = self.model.forward(batched.view())?;
        let scores = softmax(&logits.to_vec());

        if scores.len() != self.vocabulary.len() {
            return Err(ClassifierError::VocabularyMismatch {
                classes: self.vocabulary.len(),
                scores: scores.len(),
            });
        }

        let index = argmax(&scores).ok_or(ClassifierError::EmptyScores)?;
        let confidence = scores[index];
        let label = self
            .vocabulary
            .get(index)
            .ok_or(ClassifierError::VocabularyMismatch {
                classes: self.vocabulary.len(),
                scores: scores.len(),
            })?
            .to_string();

        tracing::debug!("Predicted {} with confidence {:.3}", label, confidence);

        Ok(Prediction { label, confidence })
    }

    /// Decodes an encoded image (png, jpeg, ...) and classifies it.
    pub fn predict_bytes(&self, image_data: &[u8]) -> Result<Prediction, ClassifierError> {
        let image_reader = image::ImageReader::new(Cursor::new(image_data))
            .with_guessed_format()
            .map_err(|e| ClassifierError::ImageDecode(image::ImageError::IoError(e)))?;
        let image = image_reader.decode()?;
        self.predict(&image)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}
