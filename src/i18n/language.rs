//! Language type: validated language code.
//!
//! MyCoRe serves whatever languages the repository is configured with, so
//! there is no fixed registry here. A code only has to be safe to use as a
//! URL path segment and as a cache-key prefix.

use crate::error::{ApiError, ApiResult};
use std::fmt;

/// Longest tag allowed by BCP 47 implementations in practice
const MAX_CODE_LEN: usize = 35;

/// A validated language code such as `en`, `de` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(String);

impl Language {
    /// Validate a language code.
    ///
    /// Accepts ASCII letters, digits, `-` and `_`, starting with a letter.
    ///
    /// # Example
    /// ```
    /// use mycore_client::i18n::Language;
    ///
    /// assert!(Language::parse("de").is_ok());
    /// assert!(Language::parse("../de").is_err());
    /// ```
    pub fn parse(code: &str) -> ApiResult<Language> {
        let valid = !code.is_empty()
            && code.len() <= MAX_CODE_LEN
            && code.starts_with(|c: char| c.is_ascii_alphabetic())
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Language(code.to_string()))
        } else {
            Err(ApiError::InvalidLanguage(code.to_string()))
        }
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Cache key for `key` under this language: `"{lang}_{key}"`.
    pub fn qualify(&self, key: &str) -> String {
        format!("{}_{}", self.0, key)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
