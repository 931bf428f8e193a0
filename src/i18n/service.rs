use crate::cache::{Cache, MemoryCache};
use crate::config::Config;
use crate::error::ApiResult;
use crate::http::{json_body, request_failed};
use crate::i18n::template::{substitute, TranslationParams};
use crate::i18n::{Language, MetricsReport, TranslationMetrics};
use crate::url_builder::{parse_base, with_segments};
use reqwest::Url;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// A bundle of translation key -> translated string, as served by MyCoRe
pub type TranslationBundle = HashMap<String, String>;

/// Fetches UI translations from a MyCoRe server and caches them per language.
///
/// Entries are cached under `"{lang}_{key}"` using the language that was
/// active when they were written. Switching languages never invalidates or
/// re-keys existing entries; lookups in the new language simply miss and
/// fetch again.
pub struct LangService {
    client: reqwest::Client,
    base_url: Url,
    current_lang: RwLock<Language>,
    cache: Arc<dyn Cache<String>>,
    cache_ttl: u64,
    metrics: TranslationMetrics,
}

impl LangService {
    /// Create a service with a private in-memory cache.
    pub fn new(base_url: &str, lang: &str) -> ApiResult<Self> {
        Self::with_cache(base_url, lang, Arc::new(MemoryCache::<String>::new()))
    }

    /// Create a service backed by a caller-provided cache.
    pub fn with_cache(
        base_url: &str,
        lang: &str,
        cache: Arc<dyn Cache<String>>,
    ) -> ApiResult<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: parse_base(base_url)?,
            current_lang: RwLock::new(Language::parse(lang)?),
            cache,
            cache_ttl: 0,
            metrics: TranslationMetrics::new(),
        })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Ok(Self::new(&config.base_url, &config.lang)?.with_cache_ttl(config.translation_ttl_secs))
    }

    /// Use a shared `reqwest::Client` instead of a private one.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Expire translations written by this service after `secs` seconds (0 = never).
    pub fn with_cache_ttl(mut self, secs: u64) -> Self {
        self.cache_ttl = secs;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache(&self) -> Arc<dyn Cache<String>> {
        Arc::clone(&self.cache)
    }

    pub fn current_lang(&self) -> String {
        self.language().code().to_string()
    }

    /// Switch the language used for subsequent lookups.
    ///
    /// Invalid codes are rejected and leave the current language unchanged.
    /// Cached entries are not touched.
    pub fn set_current_lang(&self, code: &str) -> ApiResult<()> {
        let lang = Language::parse(code)?;
        *self
            .current_lang
            .write()
            .unwrap_or_else(PoisonError::into_inner) = lang;
        Ok(())
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    fn language(&self) -> Language {
        self.current_lang
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch every translation under `prefix` for the current language and
    /// store each entry in the cache.
    ///
    /// Fails if the server is unreachable or answers with a non-success status.
    pub async fn cache_translations(&self, prefix: &str) -> ApiResult<()> {
        let lang = self.language();
        let bundle = self.fetch_bundle(&lang, prefix).await?;
        let count = bundle.len();

        for (key, value) in bundle {
            self.cache.set(&lang.qualify(&key), value, self.cache_ttl);
        }

        info!(
            "Cached {} translations for prefix '{}' ({})",
            count, prefix, lang
        );
        Ok(())
    }

    /// Resolve `key` in the current language.
    ///
    /// Never fails: when no translation can be found, including when the
    /// server cannot be reached, the placeholder marker `??key??` is returned.
    /// With `params`, every `{name}` placeholder that has a parameter is
    /// replaced; others are left as they are.
    pub async fn translate(&self, key: &str, params: Option<&TranslationParams>) -> String {
        let lang = self.language();
        let qualified = lang.qualify(key);

        let translation = match self.cache.get(&qualified) {
            Some(value) => {
                self.metrics.record_cache_hit();
                debug!("Translation cache hit for '{}'", qualified);
                Some(value)
            }
            None => {
                self.metrics.record_cache_miss();
                debug!("Translation cache miss for '{}'", qualified);
                self.fetch_single(&lang, key, &qualified).await
            }
        };

        match (translation, params) {
            (None, _) => format!("??{}??", key),
            (Some(translation), Some(params)) => substitute(&translation, params),
            (Some(translation), None) => translation,
        }
    }

    /// Miss path of `translate`: fetch a bundle scoped to the key itself.
    async fn fetch_single(&self, lang: &Language, key: &str, qualified: &str) -> Option<String> {
        match self.fetch_bundle(lang, key).await {
            Ok(mut bundle) => {
                let value = bundle.remove(key)?;
                self.cache.set(qualified, value.clone(), self.cache_ttl);
                Some(value)
            }
            Err(e) => {
                warn!("Translation lookup for '{}' failed: {}", key, e);
                None
            }
        }
    }

    async fn fetch_bundle(&self, lang: &Language, prefix: &str) -> ApiResult<TranslationBundle> {
        let operation = format!("Failed to fetch translations for prefix '{}'", prefix);
        let url = self.bundle_url(lang, prefix)?;

        self.metrics.record_fetch();
        debug!("Fetching translation bundle {}", url);

        let result = self.request_bundle(url, &operation).await;
        if result.is_err() {
            self.metrics.record_fetch_failure();
        }
        result
    }

    async fn request_bundle(&self, url: Url, operation: &str) -> ApiResult<TranslationBundle> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(request_failed(operation))?;
        json_body(response, operation).await
    }

    /// `{base}/rsc/locale/translate/{lang}/{prefix}`, with each segment encoded.
    fn bundle_url(&self, lang: &Language, prefix: &str) -> ApiResult<Url> {
        with_segments(
            &self.base_url,
            &["rsc", "locale", "translate", lang.code(), prefix],
        )
    }
}

impl std::fmt::Debug for LangService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangService")
            .field("base_url", &self.base_url.as_str())
            .field("current_lang", &self.current_lang())
            .field("cache_size", &self.cache.size())
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::ApiError;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Test Helpers ====================

    async fn mount_bundle(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn params(pairs: &[(&str, serde_json::Value)]) -> TranslationParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    // ==================== Construction ====================

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(matches!(
            LangService::new("::not a url::", "en"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_new_rejects_invalid_language() {
        assert!(matches!(
            LangService::new("https://repo.example.org", ""),
            Err(ApiError::InvalidLanguage(_))
        ));
    }

    #[test]
    fn test_bundle_url_encodes_segments() {
        let service = LangService::new("https://repo.example.org/mir", "de").unwrap();
        let lang = Language::parse("de").unwrap();

        let url = service.bundle_url(&lang, "component.nav.*").unwrap();
        assert_eq!(
            url.as_str(),
            "https://repo.example.org/mir/rsc/locale/translate/de/component.nav.*"
        );

        let url = service.bundle_url(&lang, "a b/c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://repo.example.org/mir/rsc/locale/translate/de/a%20b%2Fc"
        );
    }

    // ==================== Language Switching ====================

    #[test]
    fn test_set_current_lang() {
        let service = LangService::new("https://repo.example.org", "en").unwrap();
        service.set_current_lang("de").unwrap();
        assert_eq!(service.current_lang(), "de");
    }

    #[test]
    fn test_set_invalid_lang_keeps_previous() {
        let service = LangService::new("https://repo.example.org", "en").unwrap();
        assert!(service.set_current_lang("").is_err());
        assert_eq!(service.current_lang(), "en");
    }

    // ==================== cache_translations ====================

    #[tokio::test]
    async fn test_cache_translations_stores_qualified_keys() {
        let mock_server = MockServer::start().await;
        mount_bundle(
            &mock_server,
            "/rsc/locale/translate/en/nav",
            json!({"home": "Home", "about": "About"}),
        )
        .await;

        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::new());
        let service =
            LangService::with_cache(&mock_server.uri(), "en", Arc::clone(&cache)).unwrap();

        service.cache_translations("nav").await.expect("Should succeed");

        assert_eq!(cache.get("en_home"), Some("Home".to_string()));
        assert_eq!(cache.get("en_about"), Some("About".to_string()));
        assert_eq!(cache.get("home"), None);
        assert_eq!(cache.size(), 2);
    }

    #[tokio::test]
    async fn test_cache_translations_error_names_prefix() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rsc/locale/translate/en/nav"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let service = LangService::new(&mock_server.uri(), "en").unwrap();
        let err = service.cache_translations("nav").await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("prefix 'nav'"), "got: {}", message);
        assert!(message.contains("500"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_cache_translations_applies_ttl() {
        let mock_server = MockServer::start().await;
        mount_bundle(
            &mock_server,
            "/rsc/locale/translate/en/nav",
            json!({"home": "Home"}),
        )
        .await;

        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::with_clock(clock.clone()));
        let service = LangService::with_cache(&mock_server.uri(), "en", Arc::clone(&cache))
            .unwrap()
            .with_cache_ttl(60);

        service.cache_translations("nav").await.unwrap();
        assert!(cache.has("en_home"));

        clock.advance(60_000);
        assert!(!cache.has("en_home"));
    }

    // ==================== translate ====================

    #[tokio::test]
    async fn test_translate_cache_hit_with_params() {
        let mock_server = MockServer::start().await;
        mount_bundle(
            &mock_server,
            "/rsc/locale/translate/en/greeting",
            json!({"greeting": "Hello {name}"}),
        )
        .await;

        let service = LangService::new(&mock_server.uri(), "en").unwrap();
        service.cache_translations("greeting").await.unwrap();

        let result = service
            .translate("greeting", Some(&params(&[("name", json!("Ann"))])))
            .await;
        assert_eq!(result, "Hello Ann");

        let report = service.metrics();
        assert_eq!(report.cache_hits, 1);
        assert_eq!(report.cache_misses, 0);
    }

    #[tokio::test]
    async fn test_translate_hit_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::new());
        cache.set("en_title", "Title".to_string(), 0);
        let service = LangService::with_cache(&mock_server.uri(), "en", cache).unwrap();

        assert_eq!(service.translate("title", None).await, "Title");
    }

    #[tokio::test]
    async fn test_translate_cache_hit_reads_language_qualified_key() {
        // A value stored only under the bare key is never returned: the hit
        // check and the read both use "{lang}_{key}".
        let mock_server = MockServer::start().await;
        mount_bundle(&mock_server, "/rsc/locale/translate/en/title", json!({})).await;

        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::new());
        cache.set("title", "Unqualified".to_string(), 0);
        let service = LangService::with_cache(&mock_server.uri(), "en", cache).unwrap();

        assert_eq!(service.translate("title", None).await, "??title??");

        service.cache().set("en_title", "Qualified".to_string(), 0);
        assert_eq!(service.translate("title", None).await, "Qualified");
    }

    #[tokio::test]
    async fn test_translate_miss_fetches_and_caches() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rsc/locale/translate/en/button.save"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"button.save": "Save", "button.save.tooltip": "Save it"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::new());
        let service =
            LangService::with_cache(&mock_server.uri(), "en", Arc::clone(&cache)).unwrap();

        assert_eq!(service.translate("button.save", None).await, "Save");
        // Second call is served from the cache (expect(1) above)
        assert_eq!(service.translate("button.save", None).await, "Save");

        assert_eq!(cache.get("en_button.save"), Some("Save".to_string()));
        // Only the requested key is stored on the miss path
        assert!(!cache.has("en_button.save.tooltip"));
    }

    #[tokio::test]
    async fn test_translate_missing_key_returns_marker() {
        let mock_server = MockServer::start().await;
        mount_bundle(
            &mock_server,
            "/rsc/locale/translate/en/missing.key",
            json!({}),
        )
        .await;

        let service = LangService::new(&mock_server.uri(), "en").unwrap();
        assert_eq!(service.translate("missing.key", None).await, "??missing.key??");
    }

    #[tokio::test]
    async fn test_translate_server_error_returns_marker() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let service = LangService::new(&mock_server.uri(), "en").unwrap();
        assert_eq!(service.translate("missing.key", None).await, "??missing.key??");

        let report = service.metrics();
        assert_eq!(report.fetches, 1);
        assert_eq!(report.fetch_failures, 1);
    }

    #[tokio::test]
    async fn test_translate_unreachable_server_returns_marker() {
        let service = LangService::new("http://127.0.0.1:9", "en").unwrap();
        assert_eq!(service.translate("any.key", None).await, "??any.key??");
    }

    #[tokio::test]
    async fn test_translate_malformed_bundle_returns_marker() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let service = LangService::new(&mock_server.uri(), "en").unwrap();
        assert_eq!(service.translate("k", None).await, "??k??");
    }

    #[tokio::test]
    async fn test_translate_unmatched_placeholder_untouched() {
        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::new());
        cache.set("en_hi", "Hi {name}".to_string(), 0);
        let service = LangService::with_cache("http://127.0.0.1:9", "en", cache).unwrap();

        assert_eq!(service.translate("hi", Some(&params(&[]))).await, "Hi {name}");
    }

    #[tokio::test]
    async fn test_translate_without_params_returns_raw() {
        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::new());
        cache.set("en_hi", "Hi {name}".to_string(), 0);
        let service = LangService::with_cache("http://127.0.0.1:9", "en", cache).unwrap();

        assert_eq!(service.translate("hi", None).await, "Hi {name}");
    }

    #[tokio::test]
    async fn test_switching_language_does_not_reuse_other_language_entries() {
        let mock_server = MockServer::start().await;
        mount_bundle(
            &mock_server,
            "/rsc/locale/translate/de/greeting",
            json!({"greeting": "Hallo"}),
        )
        .await;

        let cache: Arc<dyn Cache<String>> = Arc::new(MemoryCache::<String>::new());
        cache.set("en_greeting", "Hello".to_string(), 0);
        let service =
            LangService::with_cache(&mock_server.uri(), "en", Arc::clone(&cache)).unwrap();

        assert_eq!(service.translate("greeting", None).await, "Hello");

        service.set_current_lang("de").unwrap();
        assert_eq!(service.translate("greeting", None).await, "Hallo");

        // The English entry is still there
        assert_eq!(cache.get("en_greeting"), Some("Hello".to_string()));
        assert_eq!(cache.get("de_greeting"), Some("Hallo".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_misses_both_fetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rsc/locale/translate/en/k"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"k": "V"})))
            .expect(2)
            .mount(&mock_server)
            .await;

        let service = LangService::new(&mock_server.uri(), "en").unwrap();
        let (a, b) = tokio::join!(service.translate("k", None), service.translate("k", None));

        assert_eq!(a, "V");
        assert_eq!(b, "V");
        assert_eq!(service.cache().size(), 1);
    }
}
