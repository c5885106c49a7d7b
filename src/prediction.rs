// Wire types for the Custom Vision classify response and the validated
// `Prediction` record the rest of the crate works with.

use crate::error::ClassifyError;
use serde::{Deserialize, Serialize};

/// One (label, confidence) pair as returned by the remote classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    /// Probability in `[0.0, 1.0]`.
    pub confidence: f64,
}

/// Response body of `.../classify/iterations/{name}/image`. Only the
/// prediction list is required; the rest is kept for logging.
#[derive(Deserialize, Debug)]
pub struct ImagePrediction {
    pub id: Option<String>,
    pub iteration: Option<String>,
    pub created: Option<String>,
    pub predictions: Vec<WirePrediction>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WirePrediction {
    pub probability: f64,
    pub tag_id: Option<String>,
    pub tag_name: String,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Deserialize, Debug)]
pub struct ServiceError {
    pub code: Option<String>,
    pub message: String,
}

impl TryFrom<WirePrediction> for Prediction {
    type Error = ClassifyError;

    fn try_from(wire: WirePrediction) -> Result<Self, Self::Error> {
        if wire.tag_name.trim().is_empty() {
            return Err(ClassifyError::Decode("prediction with empty tagName".into()));
        }
        if !wire.probability.is_finite() || !(0.0..=1.0).contains(&wire.probability) {
            return Err(ClassifyError::Decode(format!(
                "probability {} for {:?} is outside [0, 1]",
                wire.probability, wire.tag_name
            )));
        }
        Ok(Prediction {
            label: wire.tag_name,
            confidence: wire.probability,
        })
    }
}

/// Decode a classify response body. Order is preserved exactly.
pub fn decode_predictions(body: &[u8]) -> Result<Vec<Prediction>, ClassifyError> {
    let parsed: ImagePrediction = serde_json::from_slice(body)
        .map_err(|e| ClassifyError::Decode(e.to_string()))?;
    tracing::debug!(
        id = parsed.id.as_deref().unwrap_or("-"),
        iteration = parsed.iteration.as_deref().unwrap_or("-"),
        count = parsed.predictions.len(),
        "decoded prediction response"
    );
    parsed
        .predictions
        .into_iter()
        .map(Prediction::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn keeps_service_order() {
        // Deliberately not sorted by probability.
        let raw = body(json!({
            "id": "a1",
            "project": "p",
            "iteration": "it",
            "created": "2024-03-01T10:00:00Z",
            "predictions": [
                { "probability": 0.2, "tagId": "t1", "tagName": "beagle" },
                { "probability": 0.7, "tagId": "t2", "tagName": "husky" }
            ]
        }));
        let predictions = decode_predictions(&raw).unwrap();
        let labels: Vec<_> = predictions.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["beagle", "husky"]);
        assert!((predictions[1].confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn keeps_full_probability_precision() {
        let raw = body(json!({
            "predictions": [{ "probability": 0.00005, "tagName": "pug" }]
        }));
        let predictions = decode_predictions(&raw).unwrap();
        assert_eq!(predictions[0].confidence, 0.00005);
        assert_eq!(
            crate::present::prediction_lines(&predictions),
            vec!["pug: 0.01%"]
        );
    }

    #[test]
    fn empty_prediction_list_is_valid() {
        let raw = body(json!({ "predictions": [] }));
        assert!(decode_predictions(&raw).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let raw = body(json!({
            "predictions": [{ "probability": 1.5, "tagName": "pug" }]
        }));
        assert!(matches!(
            decode_predictions(&raw),
            Err(ClassifyError::Decode(_))
        ));
    }

    #[test]
    fn rejects_empty_label() {
        let raw = body(json!({
            "predictions": [{ "probability": 0.5, "tagName": "" }]
        }));
        assert!(matches!(
            decode_predictions(&raw),
            Err(ClassifyError::Decode(_))
        ));
    }

    #[test]
    fn rejects_wrong_shape() {
        let raw = body(json!({ "predictions": [{ "score": 0.5, "label": "pug" }] }));
        assert!(matches!(
            decode_predictions(&raw),
            Err(ClassifyError::Decode(_))
        ));
        assert!(decode_predictions(b"not json").is_err());
    }
}
