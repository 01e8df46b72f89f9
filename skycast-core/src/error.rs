use thiserror::Error;

/// Errors produced by a single search invocation.
///
/// Every non-success HTTP status from the weather endpoint collapses into
/// [`SearchError::NotFound`]; the response body is never shown to the user.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The submitted query was empty after trimming. Local validation,
    /// no request is issued.
    #[error("Please enter a city name")]
    EmptyQuery,

    /// The weather endpoint answered with a non-success status.
    #[error("City not found")]
    NotFound,

    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}
