//! Shared response handling for the fail-loud client calls.

use crate::error::{ApiError, ApiResult};
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Wrap a transport error with the name of the operation that issued it.
pub fn request_failed(operation: impl Into<String>) -> impl FnOnce(reqwest::Error) -> ApiError {
    let operation = operation.into();
    move |source| ApiError::Request { operation, source }
}

/// Turn a non-2xx response into [`ApiError::Status`], keeping the body text.
pub async fn ensure_success(response: Response, operation: &str) -> ApiResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));

    Err(ApiError::Status {
        operation: operation.to_string(),
        status,
        body,
    })
}

/// Check the status, then decode the JSON body.
pub async fn json_body<T: DeserializeOwned>(response: Response, operation: &str) -> ApiResult<T> {
    ensure_success(response, operation)
        .await?
        .json()
        .await
        .map_err(|source| ApiError::Decode {
            operation: operation.to_string(),
            source,
        })
}
