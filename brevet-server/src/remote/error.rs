//! Remote API error types.

/// Errors that can occur when talking to a remote brevet API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote has no such brevet
    #[error("brevet not found on remote API")]
    NotFound,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ClientError::Api {
            status: 400,
            message: "no control distances were entered".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error 400: no control distances were entered"
        );
        assert_eq!(
            ClientError::NotFound.to_string(),
            "brevet not found on remote API"
        );
    }
}
