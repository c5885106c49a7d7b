// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive CLI.
//
// Module responsibilities:
// - `config`: loads the Custom Vision credentials from the environment.
// - `api`: the blocking prediction client and the `ImageClassifier` seam.
// - `prediction`: typed wire records, validated when decoded.
// - `input`: turns an upload path or an image URL into image bytes.
// - `present`: formats predictions for the terminal.
// - `pipeline`: one interaction, input -> classify -> outcome.
// - `ui`: the interactive menu that drives `pipeline`.
pub mod api;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod prediction;
pub mod present;
pub mod ui;

pub use api::{ImageClassifier, PredictionClient};
pub use config::Config;
pub use error::{ClassifyError, ConfigError, InputError, PipelineError};
pub use input::{ImageInput, ImagePreview, ImageSource};
pub use prediction::Prediction;
