use super::send;
use crate::error::ApiResult;
use crate::url_builder::{build_url, parse_base, with_segments};
use reqwest::Url;
use tracing::info;

/// URL of the server's ORCID OAuth entry point, for a browser redirect.
///
/// The URL is only constructed; nothing is fetched.
pub fn oauth_init_url(base_url: &str, scope: Option<&str>) -> ApiResult<Url> {
    let params = scope.map(|scope| [("scope", scope)]);
    build_url(
        base_url,
        Some("rsc/orcid/oauth/init"),
        params.as_ref().map(|p| p.as_slice()),
        None,
    )
}

/// Revoke the server's OAuth access to `orcid`.
pub async fn revoke_oauth(
    client: &reqwest::Client,
    base_url: &str,
    orcid: &str,
    token: &str,
) -> ApiResult<()> {
    let operation = format!("Failed to revoke ORCID OAuth access for {}", orcid);
    let url = with_segments(&parse_base(base_url)?, &["rsc", "orcid", "oauth", orcid])?;

    send(client.delete(url).bearer_auth(token), &operation).await?;

    info!("Revoked ORCID OAuth access for {}", orcid);
    Ok(())
}
