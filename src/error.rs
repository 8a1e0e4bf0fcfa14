use thiserror::Error;

/// Failures that abort a whole autofill invocation.
///
/// Per-item problems while applying a result are never represented here;
/// those are logged and skipped by the applier.
#[derive(Debug, Error)]
pub enum AutofillError {
    /// A document element the payload cannot be built without is absent.
    #[error("required field '{0}' not found in document")]
    MissingRequiredField(String),

    /// The request never produced a response (connect, DNS, transport errors).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered outside the 2xx range.
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// The response body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The request payload could not be encoded or decoded.
    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No resolver rule exists for the requested label.
    #[error("could not find autofiller for '{0}'")]
    UnknownRule(String),
}

pub type Result<T> = std::result::Result<T, AutofillError>;
