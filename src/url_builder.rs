use crate::error::{ApiError, ApiResult};
use reqwest::Url;

/// Build a URL from a base, an optional relative path, query parameters and
/// a fragment.
///
/// The base is treated as a directory: `https://host/mir` and
/// `https://host/mir/` both resolve `rsc/jwt` to `https://host/mir/rsc/jwt`.
/// A path starting with `/` replaces the base path entirely.
///
/// Each parameter is *set*, replacing any parameter of the same name already
/// present on the base, and values are form-urlencoded.
pub fn build_url(
    base: &str,
    path: Option<&str>,
    params: Option<&[(&str, &str)]>,
    fragment: Option<&str>,
) -> ApiResult<Url> {
    let mut url = parse_base(base)?;

    if let Some(path) = path {
        url = url.join(path).map_err(|e| ApiError::InvalidUrl {
            input: path.to_string(),
            reason: e.to_string(),
        })?;
    }

    if let Some(params) = params {
        for (name, value) in params {
            set_query_param(&mut url, name, value);
        }
    }

    if let Some(fragment) = fragment {
        url.set_fragment(Some(fragment));
    }

    Ok(url)
}

/// Parse `base`, appending a trailing slash so relative joins stay beneath it.
pub fn parse_base(base: &str) -> ApiResult<Url> {
    let mut url = Url::parse(base).map_err(|e| ApiError::InvalidUrl {
        input: base.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            input: base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let with_slash = format!("{}/", url.path());
        url.set_path(&with_slash);
    }

    Ok(url)
}

/// Append path segments to `base`, percent-encoding each one.
///
/// Unlike [`build_url`], a `/` inside a segment is encoded rather than
/// starting a new segment, so identifiers can be passed through verbatim.
pub fn with_segments(base: &Url, segments: &[&str]) -> ApiResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl {
            input: base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(existing, _)| existing != name)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (k, v) in &kept {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(name, value);
}
