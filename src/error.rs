use std::path::PathBuf;

use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

/// The JSON object every surfaced failure is printed as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Failures while reading the dataset file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Data file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load data: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to load data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to load data: {0}")]
    Shape(String),
}

/// Failures surfaced by the keyword ranker.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An error object that arrived inside the dataset, passed through as-is.
    #[error("{0}")]
    Payload(serde_json::Value),

    #[error("Search failed: {0}")]
    Failed(String),
}

impl SearchError {
    /// Render this error as the JSON document printed on stdout.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Payload(value) => value.clone(),
            other => serde_json::json!({ "error": other.to_string() }),
        }
    }
}

/// Failures while synthesizing audio. Never printed as a payload; the
/// speech utility collapses them to `audio_data: null`.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("no text left to synthesize after stripping markup")]
    EmptyText,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-level error used by the binaries for anything that is not
/// reported as a JSON payload.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_path() {
        let err = LoadError::NotFound(PathBuf::from("attached_assets/x.json"));
        assert_eq!(err.to_string(), "Data file not found at attached_assets/x.json");
    }

    #[test]
    fn load_error_passes_through_search_error() {
        let err = SearchError::from(LoadError::Shape("bad row".into()));
        assert_eq!(
            err.to_json(),
            serde_json::json!({ "error": "Failed to load data: bad row" })
        );
    }

    #[test]
    fn payload_is_returned_unchanged() {
        let value = serde_json::json!({ "error": "upstream", "code": 7 });
        let err = SearchError::Payload(value.clone());
        assert_eq!(err.to_json(), value);
    }

    #[test]
    fn failed_is_prefixed() {
        let err = SearchError::Failed("dataset is not a list".into());
        assert_eq!(err.to_string(), "Search failed: dataset is not a list");
    }
}
