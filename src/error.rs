use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

/// The only failure text that crosses the pipeline boundary.
pub const USER_ERROR_MESSAGE: &str = "Could not fetch stock data.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}

/// Upstream failures, kept apart for diagnostics only.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("quote request for {symbol} returned status {status}")]
    NotFoundOrRateLimited { symbol: String, status: u16 },
    #[error("no chart data in candle response")]
    NoChartData,
    #[error("transport failure: {0}")]
    NetworkFailure(#[source] reqwest::Error),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl FetchError {
    pub fn malformed<T: Into<String>>(detail: T) -> Self {
        FetchError::MalformedPayload(detail.into())
    }

    /// Short tag used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NotFoundOrRateLimited { .. } => "not-found-or-rate-limited",
            FetchError::NoChartData => "no-chart-data",
            FetchError::NetworkFailure(_) => "network-failure",
            FetchError::MalformedPayload(_) => "malformed-payload",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_name_each_failure() {
        let errors = [
            FetchError::NotFoundOrRateLimited {
                symbol: "AAPL".to_string(),
                status: 429,
            },
            FetchError::NoChartData,
            FetchError::malformed("missing quoteSummary"),
        ];

        assert_eq!(errors[0].kind(), "not-found-or-rate-limited");
        assert_eq!(errors[1].kind(), "no-chart-data");
        assert_eq!(errors[2].kind(), "malformed-payload");
    }

    #[test]
    fn json_errors_become_malformed_payloads() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fetch: FetchError = err.into();
        assert_eq!(fetch.kind(), "malformed-payload");
    }
}
