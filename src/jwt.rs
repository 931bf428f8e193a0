use crate::error::{ApiError, ApiResult};
use crate::http::{json_body, request_failed};
use crate::url_builder::build_url;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct JwtResponse {
    login_success: bool,
    access_token: Option<String>,
}

/// Fetch a short-lived access token from `{base_url}/rsc/jwt`.
///
/// `params` are passed through as query parameters (e.g. `ua=orcid`).
/// A non-success status is an error, as is an answer with
/// `login_success: false` ([`ApiError::LoginFailed`]).
pub async fn fetch_jwt(
    client: &reqwest::Client,
    base_url: &str,
    params: Option<&[(&str, &str)]>,
) -> ApiResult<String> {
    let url = build_url(base_url, Some("rsc/jwt"), params, None)?;
    let operation = format!("Failed to fetch JWT for {}", url);

    debug!("Requesting access token from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(request_failed(operation.as_str()))?;
    let jwt: JwtResponse = json_body(response, &operation).await?;

    if !jwt.login_success {
        return Err(ApiError::LoginFailed);
    }

    jwt.access_token.ok_or(ApiError::LoginFailed)
}
