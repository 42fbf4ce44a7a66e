use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode, Url, Version};
use tokio::time::timeout;
use tracing::debug;

use crate::args::HttpMethod;
use crate::error::FetchError;

/// Everything one invocation needs: the target plus the two independent
/// timers of the timeout pair. Constructed per call; nothing is shared
/// across invocations.
#[derive(Debug, Clone, Default)]
pub struct FetchPlan {
    /// Target URL, kept verbatim: error messages quote this exact string.
    pub target: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Bounds connection establishment only, TLS included. Unset or zero
    /// means no bound.
    pub connect_timeout: Option<Duration>,
    /// Bounds the entire operation, connect phase included. Unset or zero
    /// means no bound.
    pub max_time: Option<Duration>,
    /// Skip TLS certificate verification (test/diagnostic use only).
    pub insecure: bool,
    pub http3: bool,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

/// Performs exactly one HTTP request against the plan's target.
///
/// The connect-phase bound is enforced inside the client; the overall
/// bound wraps the whole exchange here. When both could fire, the outer
/// deadline wins: it drops the in-flight exchange, so the connect-timeout
/// classification is only reachable when the connect sub-deadline fires
/// strictly first.
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` before any network I/O for a malformed
/// target, `FetchError::ConnectTimeout`/`FetchError::DeadlineExceeded` with
/// their fixed message text for the two named timeout conditions, or
/// `FetchError::Transport` carrying any other client error unmodified.
pub async fn execute(client: &Client, plan: &FetchPlan) -> Result<FetchOutcome, FetchError> {
    let url = parse_target(&plan.target)?;
    let started = Instant::now();

    let exchange = send_request(client, plan, url);
    let result = match effective_bound(plan.max_time) {
        Some(limit) => match timeout(limit, exchange).await {
            Ok(result) => result,
            Err(_elapsed) => {
                debug!(address = %plan.target, "overall deadline exceeded");
                return Err(FetchError::DeadlineExceeded {
                    address: plan.target.clone(),
                });
            }
        },
        None => exchange.await,
    };

    match result {
        Ok(mut outcome) => {
            outcome.elapsed = started.elapsed();
            debug!(
                address = %plan.target,
                status = %outcome.status,
                elapsed_ms = u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
                "request completed"
            );
            Ok(outcome)
        }
        Err(err) => Err(classify_transport_error(plan, err)),
    }
}

fn parse_target(target: &str) -> Result<Url, FetchError> {
    Url::parse(target).map_err(|source| FetchError::InvalidUrl {
        url: target.to_owned(),
        source,
    })
}

async fn send_request(
    client: &Client,
    plan: &FetchPlan,
    url: Url,
) -> Result<FetchOutcome, reqwest::Error> {
    let mut request = client.request(plan.method.as_reqwest(), url);
    for (key, value) in &plan.headers {
        request = request.header(key, value);
    }
    if let Some(body) = plan.body.clone() {
        request = request.body(body);
    }

    let response = request.send().await?;
    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();
    let body = response.bytes().await?;

    Ok(FetchOutcome {
        status,
        version,
        headers,
        body: body.to_vec(),
        elapsed: Duration::ZERO,
    })
}

fn classify_transport_error(plan: &FetchPlan, err: reqwest::Error) -> FetchError {
    if effective_bound(plan.connect_timeout).is_some() && err.is_connect() && is_timeout_error(&err)
    {
        debug!(address = %plan.target, "connect deadline exceeded");
        return FetchError::ConnectTimeout {
            address: plan.target.clone(),
        };
    }
    FetchError::Transport { source: err }
}

/// Zero and unset both mean "no bound".
pub(crate) fn effective_bound(bound: Option<Duration>) -> Option<Duration> {
    bound.filter(|limit| !limit.is_zero())
}

fn is_timeout_error(err: &reqwest::Error) -> bool {
    if err.is_timeout() {
        return true;
    }
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>()
            && io.kind() == std::io::ErrorKind::TimedOut
        {
            return true;
        }
        source = inner.source();
    }
    false
}
