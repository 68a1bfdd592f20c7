use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use std::net::AddrParseError;
use thiserror::Error;

/// Failures while starting or running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server stopped: {0}")]
    Serve(#[source] std::io::Error),
    #[error("invalid match rules: {0}")]
    InvalidRules(#[from] RulesError),
}

/// Scoring rules under which a set or match could never be decided correctly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("score limit {score_max} is below the set target {target}")]
    ScoreBelowTarget { score_max: u32, target: u32 },
    #[error("sets to win must be between 1 and {max}, got {got}")]
    SetsToWin { got: u32, max: u32 },
    #[error("deciding set must be at least 1")]
    DecidingSet,
    #[error("win margin must be at least 1")]
    WinMargin,
}

/// Faults surfaced to HTTP callers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::Internal(reason) => {
                error!("Internal error: {}", reason);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_messages() {
        let source = "nope".parse::<std::net::SocketAddr>().unwrap_err();
        let err = ServerError::InvalidAddress {
            addr: "nope".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid listen address nope"));
    }

    #[test]
    fn test_rules_error_wraps_into_server_error() {
        let err = ServerError::from(RulesError::SetsToWin { got: 5, max: 3 });
        assert_eq!(
            err.to_string(),
            "invalid match rules: sets to win must be between 1 and 3, got 5"
        );
    }
}
