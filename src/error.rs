use std::fmt;

/// Unified error type for the correlation pipeline.
///
/// Deliberately not an axum response type: route handlers collapse these
/// onto the numeric wire contract instead of surfacing HTTP error statuses.
#[derive(Debug)]
pub enum CorrError {
    /// Upstream API unreachable, timed out, or answered with a non-2xx status.
    Upstream(String),
    /// Upstream body was not JSON, or not the shape we expect at the top level.
    MalformedResponse(String),
    /// The two datasets share no countries, so there is nothing to correlate.
    NoOverlap,
    /// Fewer than two paired points, or a degenerate (zero-variance) series.
    InsufficientData(String),
}

impl fmt::Display for CorrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrError::Upstream(msg) => write!(f, "upstream_error: {msg}"),
            CorrError::MalformedResponse(msg) => write!(f, "malformed_response: {msg}"),
            CorrError::NoOverlap => write!(f, "no_overlap: datasets share no common countries"),
            CorrError::InsufficientData(msg) => write!(f, "insufficient_data: {msg}"),
        }
    }
}

impl std::error::Error for CorrError {}

impl From<reqwest::Error> for CorrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CorrError::MalformedResponse(err.to_string())
        } else {
            CorrError::Upstream(err.to_string())
        }
    }
}
