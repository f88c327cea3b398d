/// Error type for list loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[cfg(feature = "fetch")]
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "fetch")]
    #[error("Request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[cfg(feature = "fetch")]
    #[error("Unexpected status {status} from '{url}'")]
    Status { url: String, status: u16 },
    #[error("Invalid list resource: {0}")]
    Parse(#[from] serde_json::Error),
    #[cfg(feature = "fetch")]
    #[error("Invalid list URL '{0}'")]
    InvalidUrl(String),
}
