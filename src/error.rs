use thiserror::Error;

/// Message shown for every failure while loading an image from a URL.
pub const URL_LOAD_MESSAGE: &str =
    "Error loading image from URL. Please check the URL and try again.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
}

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("image is empty")]
    EmptyImage,

    #[error("prediction key is not a valid header value")]
    InvalidKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type: {0} (expected jpg, jpeg or png)")]
    UnsupportedType(String),

    /// Fetch, status and decode failures are not distinguished for the user.
    #[error("{}", URL_LOAD_MESSAGE)]
    UrlLoad,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] InputError),

    #[error("Loading failed: {0}")]
    Classify(#[from] ClassifyError),
}
