use super::{send, send_json, OrcidApi};
use crate::error::ApiResult;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Which ORCID API a work status is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMode {
    /// Member API: sees works visible to trusted parties, needs a token for the iD
    Member,
    /// Public API: only publicly visible works
    Public,
}

impl WorkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::Member => "member",
            WorkMode::Public => "public",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ORCID put-codes of works matching a MyCoRe object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrcidWorkStatus {
    /// Work created by this repository, if any
    pub own: Option<String>,

    /// Matching works created by other sources
    #[serde(default)]
    pub other: Vec<String>,
}

impl OrcidWorkStatus {
    pub fn is_exported(&self) -> bool {
        self.own.is_some()
    }
}

/// Object-scoped ORCID work calls.
#[derive(Debug, Clone)]
pub struct OrcidWorkService {
    api: OrcidApi,
}

impl OrcidWorkService {
    pub fn new(client: reqwest::Client, base_url: &str, token: &str) -> ApiResult<Self> {
        Ok(Self {
            api: OrcidApi::new(client, base_url, token)?,
        })
    }

    pub async fn work_status(
        &self,
        mode: WorkMode,
        orcid: &str,
        object_id: &str,
    ) -> ApiResult<OrcidWorkStatus> {
        let operation = format!(
            "Failed to fetch {} work status of {} for {}",
            mode, object_id, orcid
        );
        let request = self.api.request(
            Method::GET,
            &[mode.as_str(), orcid, "works", "object", object_id],
        )?;
        send_json(request, &operation).await
    }

    /// Ask the server to export `object_id` as a work to `orcid`.
    pub async fn export_object(&self, orcid: &str, object_id: &str) -> ApiResult<()> {
        let operation = format!("Failed to export {} to ORCID {}", object_id, orcid);
        let request = self.api.request(
            Method::POST,
            &["member", orcid, "works", "object", object_id],
        )?;
        send(request, &operation).await?;

        info!("Exported {} to ORCID {}", object_id, orcid);
        Ok(())
    }
}
