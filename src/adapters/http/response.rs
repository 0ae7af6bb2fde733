//! Shared response checks for backend calls.

use crate::domain::DomainError;

/// Max characters of an error body kept in `DomainError::Server`.
const ERROR_BODY_LIMIT: usize = 200;

/// Map transport failures (no response received) to `DomainError::Network`.
pub fn network_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::Network(format!("request timed out: {}", e))
    } else {
        DomainError::Network(e.to_string())
    }
}

/// Return the response unchanged on 2xx; otherwise `DomainError::Server` with the
/// status and the start of the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, DomainError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.trim().chars().take(ERROR_BODY_LIMIT).collect()
    };
    Err(DomainError::Server {
        status: status.as_u16(),
        message,
    })
}
