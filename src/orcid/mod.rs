//! ORCID integration endpoints of a MyCoRe server.
//!
//! - `oauth`: authorization URL construction and access revocation
//! - `user`: linked ORCID iDs and per-iD user settings
//! - `work`: work status of a MyCoRe object and export to ORCID
//!
//! All calls except [`oauth_init_url`] need a bearer token, usually obtained
//! via [`crate::jwt::fetch_jwt`].

mod oauth;
mod user;
mod work;

pub use oauth::{oauth_init_url, revoke_oauth};
pub use user::{OrcidUserService, OrcidUserSettings, OrcidUserStatus};
pub use work::{OrcidWorkService, OrcidWorkStatus, WorkMode};

use crate::error::ApiResult;
use crate::http::{ensure_success, json_body, request_failed};
use crate::url_builder::{parse_base, with_segments};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Authenticated access to `{base}/api/orcid/v1/...`.
#[derive(Clone)]
struct OrcidApi {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl OrcidApi {
    fn new(client: reqwest::Client, base_url: &str, token: &str) -> ApiResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base(base_url)?,
            token: token.to_string(),
        })
    }

    /// Build a bearer-authenticated request for `api/orcid/v1/{segments...}`.
    fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let mut path = vec!["api", "orcid", "v1"];
        path.extend_from_slice(segments);
        let url = with_segments(&self.base_url, &path)?;

        debug!("ORCID API {} {}", method, url);
        Ok(self.client.request(method, url).bearer_auth(&self.token))
    }
}

impl std::fmt::Debug for OrcidApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrcidApi")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Send `request` and require a success status.
async fn send(request: RequestBuilder, operation: &str) -> ApiResult<Response> {
    let response = request.send().await.map_err(request_failed(operation))?;
    ensure_success(response, operation).await
}

/// Send `request` and decode a JSON answer.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder, operation: &str) -> ApiResult<T> {
    let response = request.send().await.map_err(request_failed(operation))?;
    json_body(response, operation).await
}
