use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub base_url: String,

    // Translations
    pub lang: String,
    pub translation_ttl_secs: u64,

    // ORCID calls need a bearer token; translations and JWT fetch do not
    pub access_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: std::env::var("MYCORE_BASE_URL").context("MYCORE_BASE_URL not set")?,

            lang: std::env::var("MYCORE_LANG").unwrap_or_else(|_| "en".to_string()),
            translation_ttl_secs: match std::env::var("MYCORE_TRANSLATION_TTL_SECS") {
                Ok(v) => v
                    .parse()
                    .with_context(|| format!("Invalid MYCORE_TRANSLATION_TTL_SECS: '{}'", v))?,
                Err(_) => 0,
            },

            access_token: std::env::var("MYCORE_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
        })
    }
}
