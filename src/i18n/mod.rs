//! Internationalization (i18n) module: cached UI translations.
//!
//! Translations live on the MyCoRe server and are fetched in bundles by
//! prefix. [`LangService`] keeps them in an injected [`crate::cache::Cache`]
//! keyed by language, and resolves single keys with a placeholder fallback.
//!
//! # Architecture
//!
//! - `language`: validated language codes and cache-key qualification
//! - `template`: `{name}` placeholder substitution
//! - `service`: bundle fetching, caching and key resolution
//! - `metrics`: per-service cache and fetch counters
//!
//! # Example
//!
//! ```rust,ignore
//! use mycore_client::i18n::LangService;
//!
//! let service = LangService::new("https://repo.example.org/mir", "de")?;
//! service.cache_translations("component.nav").await?;
//! let title = service.translate("component.nav.home", None).await;
//! ```

mod language;
mod metrics;
mod service;
mod template;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use service::{LangService, TranslationBundle};
pub use template::{substitute, TranslationParams};
