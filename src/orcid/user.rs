use super::{send, send_json, OrcidApi};
use crate::error::ApiResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// ORCID iDs linked to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrcidUserStatus {
    pub orcids: Vec<String>,

    /// iDs for which the server holds a valid access token
    pub trusted_orcids: Vec<String>,
}

/// Per-iD export behavior. `None` means "use the server default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrcidUserSettings {
    pub always_update_work: Option<bool>,
    pub create_own_duplicate_work: Option<bool>,
    pub create_first_work: Option<bool>,
    pub recreate_deleted_work: Option<bool>,
}

/// User-scoped ORCID calls.
#[derive(Debug, Clone)]
pub struct OrcidUserService {
    api: OrcidApi,
}

impl OrcidUserService {
    pub fn new(client: reqwest::Client, base_url: &str, token: &str) -> ApiResult<Self> {
        Ok(Self {
            api: OrcidApi::new(client, base_url, token)?,
        })
    }

    pub async fn user_status(&self) -> ApiResult<OrcidUserStatus> {
        let request = self.api.request(Method::GET, &["user-status"])?;
        send_json(request, "Failed to fetch ORCID user status").await
    }

    pub async fn user_settings(&self, orcid: &str) -> ApiResult<OrcidUserSettings> {
        let operation = format!("Failed to fetch ORCID user settings for {}", orcid);
        let request = self.api.request(Method::GET, &["user-properties", orcid])?;
        send_json(request, &operation).await
    }

    pub async fn update_user_settings(
        &self,
        orcid: &str,
        settings: &OrcidUserSettings,
    ) -> ApiResult<()> {
        let operation = format!("Failed to update ORCID user settings for {}", orcid);
        let request = self
            .api
            .request(Method::PUT, &["user-properties", orcid])?
            .json(settings);
        send(request, &operation).await?;
        Ok(())
    }
}
