// One interaction: acquire the image, classify it, hand back everything the
// UI needs to render. Nothing is kept between calls.

use crate::api::ImageClassifier;
use crate::error::PipelineError;
use crate::input::{ImageInput, ImagePreview, ImageSource};
use crate::prediction::Prediction;
use reqwest::blocking::Client;

#[derive(Debug)]
pub struct Outcome {
    pub input: ImageInput,
    pub preview: ImagePreview,
    pub predictions: Vec<Prediction>,
}

/// Load the image and probe it for the preview line.
pub fn acquire(
    source: &ImageSource,
    http: &Client,
) -> Result<(ImageInput, ImagePreview), PipelineError> {
    let input = source.acquire(http)?;
    let preview = input.preview();
    tracing::debug!(%preview, "image acquired");
    Ok((input, preview))
}

pub fn classify(
    input: &ImageInput,
    classifier: &dyn ImageClassifier,
) -> Result<Vec<Prediction>, PipelineError> {
    Ok(classifier.classify(&input.bytes)?)
}

/// A load failure returns before the classifier is called.
pub fn run(
    source: &ImageSource,
    http: &Client,
    classifier: &dyn ImageClassifier,
) -> Result<Outcome, PipelineError> {
    let (input, preview) = acquire(source, http)?;
    let predictions = classify(&input, classifier)?;
    Ok(Outcome {
        input,
        preview,
        predictions,
    })
}
