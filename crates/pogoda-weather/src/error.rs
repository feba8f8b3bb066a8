//! Forecast fetch error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("forecast API returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("malformed forecast payload: {0}")]
    MalformedPayload(String),

    #[error("forecast response has no daily section")]
    MissingDaily,
}

impl FetchError {
    /// User-facing message sent to the chat when a fetch fails.
    pub fn user_message(&self) -> &'static str {
        "Не удалось получить прогноз. Попробуйте позже."
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_user_message_is_static_failure_text() {
        let err = FetchError::MissingDaily;
        assert!(err.user_message().contains("Не удалось получить прогноз"));
    }

    #[test]
    fn test_display_carries_detail() {
        let err = FetchError::BadStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }
}
