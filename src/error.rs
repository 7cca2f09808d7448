//! Upstream provider failures.
//!
//! Adapter calls return `Result<Option<T>, ProviderError>`: `Ok(Some)` when
//! the provider answered with data, `Ok(None)` when it answered "nothing
//! there", and `Err` only for failures worth retrying or reporting.

use thiserror::Error;

/// A failed call to the AMap API.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request never completed: connect, timeout, or body decode failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP status {0}")]
    Status(u16),

    /// The response arrived but its shape was not usable.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_detail() {
        let err = ProviderError::Status(502);
        assert_eq!(err.to_string(), "provider returned HTTP status 502");

        let err = ProviderError::Malformed("geocodes is not an array".to_string());
        assert!(err.to_string().contains("geocodes is not an array"));
    }
}
