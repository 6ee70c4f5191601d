use std::path::PathBuf;

/// All errors that can occur while building the awards configuration.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    /// A required environment variable is not set (or is empty).
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    /// An environment variable is set but its value cannot be used.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    /// A nominee of the given kind lacks a field it cannot do without.
    #[error("{kind} nominee is missing required field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A nominee entry has a shape that cannot be interpreted.
    #[error("malformed nominee: {reason}")]
    MalformedNominee { reason: String },

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code that is not retried.
    #[error("unexpected status {status} for {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Rate limiting or server errors persisted past the retry budget.
    #[error("giving up on {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    /// Failed to read the response body from the server.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The source document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source document is not valid JSON of the expected shape.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The output document could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The output document could not be serialized.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
