//! List fetching
//!
//! Lists are always fetched fresh: edits to the list file must show up on
//! the next load, so HTTP requests opt out of every cache on the way.

use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;
use wg_core::{UpdateMode, Validator, WordLists};

use crate::error::LoadError;
use crate::parser::parse_word_lists;
use crate::stats::ListStats;
use crate::apply_lists;

/// Where a list resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    File(PathBuf),
    Url(String),
    /// Resource body given directly.
    Inline(String),
}

impl ListSource {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Inline(_) => f.write_str("<inline>"),
        }
    }
}

/// Fetch and parse the list resource at `source`.
pub async fn fetch_word_lists(source: &ListSource) -> Result<WordLists, LoadError> {
    let body = match source {
        ListSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })?,
        ListSource::Url(url) => fetch_text(url).await?,
        ListSource::Inline(body) => body.clone(),
    };
    parse_word_lists(&body)
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let request_url = cache_busted(url)?;
    let http_err = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let response = reqwest::Client::new()
        .get(request_url)
        .header(CACHE_CONTROL, "no-cache, no-store")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(http_err)
}

/// Append a `t=<millis>` query parameter so intermediaries cannot serve a
/// stored copy.
fn cache_busted(url: &str) -> Result<Url, LoadError> {
    let mut parsed = Url::parse(url).map_err(|_| LoadError::InvalidUrl(url.to_string()))?;
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    parsed.query_pairs_mut().append_pair("t", &millis.to_string());
    Ok(parsed)
}

/// Fetch `source` and apply it to `validator`.
///
/// On failure the validator keeps whatever lists it already had; the error is
/// logged and returned so callers may report it, but nothing needs to handle
/// it for `check` to keep working.
pub async fn load_into(
    validator: &Validator,
    source: &ListSource,
    mode: UpdateMode,
) -> Result<ListStats, LoadError> {
    match fetch_word_lists(source).await {
        Ok(lists) => Ok(apply_lists(validator, lists, mode)),
        Err(e) => {
            log::warn!("lists.load_failed source={} err={}", source, e);
            Err(e)
        }
    }
}
