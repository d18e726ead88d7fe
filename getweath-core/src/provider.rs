use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::WeatherBundle;

pub mod geoapify;
pub mod wttr;

/// Why a weather fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level trouble: DNS, connect, timeout, bad endpoint.
    #[error("failed to reach the weather service: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("weather request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The service answered 200 but the payload is missing required fields.
    #[error("malformed weather payload: {0}")]
    Malformed(String),
}

/// The coarse error taxonomy surfaced to session state and the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    MalformedResponse,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(_) | FetchError::Status { .. } => ErrorKind::NetworkFailure,
            FetchError::Malformed(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// A source of weather data and place-name suggestions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus the short-range forecast for a free-form
    /// location string. Encoding the location for the wire is the
    /// implementation's responsibility.
    async fn fetch_current_and_forecast(&self, location: &str)
    -> Result<WeatherBundle, FetchError>;

    /// Autocomplete candidates for a partial location. Failures are swallowed
    /// into an empty list; this call never surfaces an error.
    async fn suggest(&self, partial: &str) -> Vec<String>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Cut on a char boundary; byte 200 may fall inside a multi-byte char.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_collapse_to_the_taxonomy() {
        let transport = FetchError::Network("connection refused".into());
        assert_eq!(transport.kind(), ErrorKind::NetworkFailure);

        let status = FetchError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "oops".into(),
        };
        assert_eq!(status.kind(), ErrorKind::NetworkFailure);

        let malformed = FetchError::Malformed("no current_condition".into());
        assert_eq!(malformed.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // A two-byte char straddling the 200-byte cap must not panic the cut.
        let mut body = "x".repeat(199);
        body.push('é');
        body.push_str(&"y".repeat(100));

        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated, format!("{}...", "x".repeat(199)));

        // All-multibyte payloads stay well-formed too.
        let emoji = "⛈️".repeat(120);
        assert!(truncate_body(&emoji).ends_with("..."));
    }
}
