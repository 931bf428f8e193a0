//! `{name}` placeholder substitution for translation strings.

use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Parameters substituted into a translation, keyed by placeholder name.
pub type TranslationParams = HashMap<String, Value>;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").expect("placeholder pattern is valid")
    })
}

/// Replace every `{name}` in `template` with `params[name]`.
///
/// Placeholders without a matching parameter are left untouched.
pub fn substitute(template: &str, params: &TranslationParams) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => stringify(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Render a parameter the way it should read inside a sentence.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
