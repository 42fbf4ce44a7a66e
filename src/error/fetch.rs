use thiserror::Error;

/// Failures of a single request invocation.
///
/// The rendered text of `ConnectTimeout` and `DeadlineExceeded` is an
/// external contract: callers and tests match on these exact strings, so
/// the wording must never change. `address` is the target URL exactly as
/// the caller supplied it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Get {address}: connect timeout")]
    ConnectTimeout { address: String },
    #[error("Get {address}: context deadline exceeded")]
    DeadlineExceeded { address: String },
    #[error("{source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error(
        "HTTP/3 support is not enabled in this build. Rebuild with --features http3 and set \
RUSTFLAGS=\"--cfg reqwest_unstable\"."
    )]
    Http3NotCompiled,
}

impl FetchError {
    /// True for the two named timeout classifications.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            FetchError::ConnectTimeout { .. } | FetchError::DeadlineExceeded { .. }
        )
    }
}
