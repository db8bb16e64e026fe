//! Error types for the DSN pipeline
//!
//! Fatal errors ([`DsnError`]) abort a pipeline run. Telemetry scanning has
//! its own two tiers: [`DishError`] only drops the offending dish, while
//! [`ScanError`] stops the scan and keeps whatever was collected so far.

use quick_xml::events::attributes::AttrError;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, DsnError>;

/// Failure to retrieve one of the source documents
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// The spacecraft directory document could not be decoded
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse spacecraft directory: {0}")]
pub struct DirectoryError(#[from] pub quick_xml::DeError);

/// Structural failure of the telemetry document; ends the scan
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Malformed telemetry document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Telemetry document ended inside a <dish> element")]
    TruncatedDish,
}

/// A single dish could not be decoded; its signals are dropped
#[derive(Debug, thiserror::Error)]
pub enum DishError {
    #[error("Malformed attribute: {0}")]
    Attr(#[from] AttrError),

    #[error("Invalid attribute value: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Errors surfaced at the pipeline boundary
#[derive(Debug, thiserror::Error)]
pub enum DsnError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Failed to encode DSN snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DsnError {
    /// True when the failure lies with the remote feeds rather than with us.
    pub fn is_upstream(&self) -> bool {
        matches!(self, DsnError::Fetch(_) | DsnError::Directory(_))
    }
}
