//! Document store error types.

use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code from the store.
        status: u16,
        /// Error body, truncated.
        message: String,
    },

    /// JSON (de)serialization failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A document failed decode-time validation.
    #[error("invalid document in {collection}/{id}: {reason}")]
    Invalid {
        /// Collection holding the document.
        collection: &'static str,
        /// Document id.
        id: String,
        /// What the validation rejected.
        reason: String,
    },

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A batched write carried a create, which the batch endpoint rejects.
    #[error("batch writes support patch and delete only")]
    BatchCreateUnsupported,

    /// A transactional commit was rejected by the store.
    #[error("commit rejected: {0}")]
    CommitRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::NotFound("foods/f-1".to_string());
        assert_eq!(err.to_string(), "not found: foods/f-1");

        let err = StoreError::Invalid {
            collection: "foods",
            id: "f-1".to_string(),
            reason: "price must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid document in foods/f-1: price must be positive"
        );

        let err = StoreError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "store API error (HTTP 503): unavailable");
    }
}
