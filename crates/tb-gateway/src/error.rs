//! Error types for tb-gateway

use thiserror::Error;

use tb_core::ApiError;

/// Fixed user-facing apology used when a downstream error body cannot be
/// parsed as [`ApiError`].
pub const CANNOT_PARSE_API_ERROR_MESSAGE: &str =
    "I'm, sorry. I cannot parse api error message from remote service :(";

/// tb-gateway error type
///
/// The `Display` of the [`Api`](GatewayError::Api) variant is the
/// downstream error's client message, so surfacing a gateway error to the
/// end user is just `error.to_string()`.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{}", .0.client_message)]
    Api(ApiError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type alias for tb-gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Map a non-success downstream response to a structured [`ApiError`].
///
/// The body is parsed as an `ApiError` JSON document; if that fails, a
/// fallback error carrying a fixed apology and the raw body is synthesized.
pub fn api_error_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(error) => error,
        Err(e) => ApiError {
            http_status: 500,
            internal_error_code: "BotInternalError".to_string(),
            client_message: CANNOT_PARSE_API_ERROR_MESSAGE.to_string(),
            developer_message: "Cannot parse api error message from remote service".to_string(),
            exception_message: e.to_string(),
            detail_errors: vec![format!("{} {}", status, body)],
        },
    }
}
