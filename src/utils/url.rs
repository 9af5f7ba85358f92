// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::{AppError, Result};

/// Parse and check a URL given as crawl input.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
///
/// # Examples
/// ```
/// use faculty_crawler::utils::url::validate_url;
///
/// assert!(validate_url("https://example.edu/people").is_ok());
/// assert!(validate_url("not-a-url").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim()).map_err(|e| AppError::invalid_url(input, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::invalid_url(
            input,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::invalid_url(input, "missing host"));
    }

    Ok(url)
}

/// Set a query parameter, replacing any existing occurrences of it.
///
/// # Examples
/// ```
/// use faculty_crawler::utils::url::{validate_url, with_query_param};
///
/// let base = validate_url("https://example.edu/people?keyword=&page=").unwrap();
/// assert_eq!(
///     with_query_param(&base, "page", "2").as_str(),
///     "https://example.edu/people?keyword=&page=2"
/// );
/// ```
pub fn with_query_param(url: &Url, param: &str, value: &str) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut result = url.clone();
    {
        let mut pairs = result.query_pairs_mut();
        pairs.clear();
        for (key, existing) in &kept {
            pairs.append_pair(key, existing);
        }
        pairs.append_pair(param, value);
    }
    result
}

/// Last non-empty path segment of a URL string, percent-decoded.
pub fn last_path_segment(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(|segment| {
            String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
        })
}
