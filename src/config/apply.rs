use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{QgetArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// CLI values always win; a config value is only used when the matching
/// option was not given on the command line.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(args: &mut QgetArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(value) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = Some(value.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "connect_timeout",
                source: err,
            })
        })?);
    }

    if !is_cli(matches, "max_time")
        && let Some(value) = config.max_time.as_ref()
    {
        args.max_time = Some(value.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "max_time",
                source: err,
            })
        })?);
    }

    if !is_cli(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }

    if !is_cli(matches, "http3")
        && let Some(http3) = config.http3
    {
        args.http3 = http3;
    }

    if !is_cli(matches, "include")
        && let Some(include) = config.include
    {
        args.include = include;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
