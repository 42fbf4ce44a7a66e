use reqwest::{Client, redirect};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::FetchError;

use super::fetch::{FetchPlan, effective_bound};

/// Builds the transport client for one plan.
///
/// The connect-phase deadline lives here: the client enforces it around
/// connection establishment (TLS included), independent of the overall
/// bound applied by the executor.
///
/// # Errors
///
/// Returns `FetchError::Http3NotCompiled` when the plan requests HTTP/3 in
/// a build without the `http3` feature, or `FetchError::BuildClient` when
/// client construction fails.
pub fn build_client(plan: &FetchPlan) -> Result<Client, FetchError> {
    let mut builder = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .redirect(redirect::Policy::none());

    if let Some(connect_timeout) = effective_bound(plan.connect_timeout) {
        builder = builder.connect_timeout(connect_timeout);
    }

    if plan.insecure {
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    if plan.http3 {
        #[cfg(feature = "http3")]
        {
            builder = builder.http3_prior_knowledge();
        }
        #[cfg(not(feature = "http3"))]
        {
            return Err(FetchError::Http3NotCompiled);
        }
    }

    builder
        .build()
        .map_err(|source| FetchError::BuildClient { source })
}
