//! Error types for the delay check.
//!
//! Every fatal error maps to a monitoring verdict: the message becomes the
//! status line and the verdict decides the exit code. Nothing is retried.

use thiserror::Error;

use crate::state::ServiceState;

/// Errors that can occur while running the check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// HTTP request failed (non-success status or protocol error).
    #[error("Encountered an exception during HTTP request: {0}")]
    Http(String),

    /// Could not reach the API at all.
    #[error("Encountered an exception during HTTP request: {0}")]
    Connection(String),

    /// Response body could not be decoded, or a timestamp was malformed.
    #[error("Encountered an exception during JSON Decoding: {0}")]
    Decode(String),

    /// Site lookup returned zero, multiple, or mismatched results.
    #[error("Invalid site id: {0}")]
    InvalidSiteId(u32),

    /// The whole run exceeded the configured deadline.
    #[error("Timeout reached after {seconds} {}", seconds_word(seconds))]
    Timeout { seconds: u64 },
}

fn seconds_word(seconds: &u64) -> &'static str {
    if *seconds == 1 {
        "second"
    } else {
        "seconds"
    }
}

impl CheckError {
    /// The verdict this error surfaces as. All runtime failures are UNKNOWN;
    /// configuration problems are rejected before a `CheckError` can exist.
    pub fn state(&self) -> ServiceState {
        ServiceState::Unknown
    }
}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            CheckError::Connection(err.to_string())
        } else if err.is_decode() {
            CheckError::Decode(err.to_string())
        } else {
            CheckError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_singular() {
        assert_eq!(
            CheckError::Timeout { seconds: 1 }.to_string(),
            "Timeout reached after 1 second"
        );
    }

    #[test]
    fn test_timeout_message_plural() {
        assert_eq!(
            CheckError::Timeout { seconds: 10 }.to_string(),
            "Timeout reached after 10 seconds"
        );
    }

    #[test]
    fn test_invalid_site_id_message() {
        assert_eq!(
            CheckError::InvalidSiteId(100).to_string(),
            "Invalid site id: 100"
        );
    }

    #[test]
    fn test_all_errors_map_to_unknown() {
        let errors = [
            CheckError::Http("boom".into()),
            CheckError::Connection("refused".into()),
            CheckError::Decode("bad json".into()),
            CheckError::InvalidSiteId(1),
            CheckError::Timeout { seconds: 5 },
        ];
        for err in errors {
            assert_eq!(err.state(), ServiceState::Unknown);
        }
    }
}
