use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header};
use super::types::HttpMethod;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Minimal curl-style HTTP client for QUIC/HTTP3 endpoints - one-shot requests with independent connect and max-time deadlines."
)]
pub struct QgetArgs {
    /// Target URL
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body data (for POST/PUT/PATCH)
    #[arg(long, short, default_value = "")]
    pub data: String,

    /// Timeout for establishing a new connection (supports ms/s/m/h; 0 = no bound)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Maximum time allowed for the whole operation (supports ms/s/m/h; 0 = no bound)
    #[arg(long = "max-time", short = 'm', value_parser = parse_duration_arg)]
    pub max_time: Option<Duration>,

    /// Skip TLS certificate verification (test/diagnostic use only)
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Speak HTTP/3 over QUIC (requires the http3 build feature)
    #[arg(long = "http3")]
    pub http3: bool,

    /// Include response status line and headers in the output
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Write the response body to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by QGET_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./qget.toml or ./qget.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
