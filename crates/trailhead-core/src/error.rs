use thiserror::Error;

/// Everything that can go wrong while asking the backend for trails.
///
/// None of these reach the UI: `TrailService` turns each of them into the
/// fallback trail list.
#[derive(Debug, Error)]
pub enum TrailQueryError {
    #[error("no Gemini API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("request to Gemini failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Gemini rejected the request: {0}")]
    Backend(String),

    #[error("malformed trail response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("a starting point is required")]
    MissingStart,
    #[error("a destination is required")]
    MissingDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a search can only be started from the home view")]
    NotOnHome,
}
