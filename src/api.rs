// API client module: a small blocking HTTP client that talks to the Custom
// Vision prediction endpoint. It is synchronous on purpose; each call blocks
// the interaction until the service answers.

use crate::config::Config;
use crate::error::ClassifyError;
use crate::prediction::{decode_predictions, Prediction, ServiceError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

const PREDICTION_KEY_HEADER: &str = "prediction-key";

/// Anything that can turn encoded image bytes into ranked predictions.
pub trait ImageClassifier {
    fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifyError>;
}

/// Prediction client holding a reqwest blocking client and the immutable
/// configuration it was built from.
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    config: Config,
}

impl PredictionClient {
    pub fn new(config: Config) -> Result<Self, ClassifyError> {
        let client = Client::builder().build()?;
        Ok(PredictionClient { client, config })
    }

    /// `{endpoint}/customvision/v3.0/Prediction/{project}/classify/iterations/{iteration}/image`
    pub fn classify_url(&self) -> String {
        format!(
            "{}/customvision/v3.0/Prediction/{}/classify/iterations/{}/image",
            self.config.endpoint, self.config.project_id, self.config.iteration_name
        )
    }

    fn headers(&self) -> Result<HeaderMap, ClassifyError> {
        let mut headers = HeaderMap::new();
        let key =
            HeaderValue::from_str(&self.config.key).map_err(|_| ClassifyError::InvalidKey)?;
        headers.insert(PREDICTION_KEY_HEADER, key);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );
        Ok(headers)
    }
}

impl ImageClassifier for PredictionClient {
    /// POST the bytes unchanged and decode the ranked predictions.
    fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifyError> {
        if image.is_empty() {
            return Err(ClassifyError::EmptyImage);
        }

        let url = self.classify_url();
        tracing::info!(%url, bytes = image.len(), "classifying image");

        let res = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .body(image.to_vec())
            .send()?;

        let status = res.status();
        let body = res.bytes()?;
        if !status.is_success() {
            let message = match serde_json::from_slice::<ServiceError>(&body) {
                Ok(err) => match err.code {
                    Some(code) => format!("{}: {}", code, err.message),
                    None => err.message,
                },
                Err(_) => String::from_utf8_lossy(&body).into_owned(),
            };
            tracing::warn!(status = status.as_u16(), %message, "prediction request rejected");
            return Err(ClassifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let predictions = decode_predictions(&body)?;
        tracing::info!(count = predictions.len(), "received predictions");
        Ok(predictions)
    }
}
