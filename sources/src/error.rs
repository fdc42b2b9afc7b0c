use thiserror::Error;

/// Custom error type for tokens, allow us to differentiate between errors.
///
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Decoding token: {0}")]
    Decoding(String),
    #[error("HTTP Error: {0}")]
    HTTP(String),
    #[error("No access token in answer")]
    NoToken,
}

/// Custom error type for the access module, allow us to differentiate between errors.
///
#[derive(Debug, Error, PartialEq)]
pub enum AccessError {
    #[error("Missing route {0}")]
    MissingRoute(String),
}

/// Everything that can go wrong while fetching state vectors.
///
/// The text of each variant is what ends up in the report so it echoes the underlying error.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchError {
    #[error("HTTP error 401: Unauthorized. Your access token may be invalid or expired. This can happen if your client credentials are wrong or the token has timed out (30 mins).")]
    Unauthorized,
    #[error("HTTP error occurred while fetching flight data: {error} - Response: {body}")]
    Status { error: String, body: String },
    #[error("Connection error occurred: {0} - Could not connect to OpenSky API. Please check your internet connection.")]
    Connection(String),
    #[error("Timeout error occurred: {error} - OpenSky API request timed out after {secs} seconds.")]
    Timeout { error: String, secs: u64 },
    #[error("An unexpected request error occurred while fetching flight data: {0}")]
    Request(String),
    #[error("Error decoding JSON response from OpenSky API: {error}. Raw response: {raw}")]
    Decode { error: String, raw: String },
}

impl FetchError {
    /// Sort a `reqwest` error into our categories
    ///
    pub fn from_reqwest(e: reqwest::Error, secs: u64) -> Self {
        if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_timeout() {
            FetchError::Timeout {
                error: e.to_string(),
                secs,
            }
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
