use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::error;

use crate::args::QgetArgs;
use crate::config::DEFAULT_CONFIG_FILES;
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{FetchPlan, build_client, execute};
use crate::output::write_response;

struct RunPlan {
    fetch: FetchPlan,
    include_headers: bool,
    output: Option<String>,
}

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    // Config must be merged before the subscriber is installed so a
    // config-supplied no_color still affects log output.
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<(QgetArgs, ArgMatches)>> {
    let mut cmd = QgetArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = QgetArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: QgetArgs) -> AppResult<()> {
    let plan = build_plan(args)?;
    let client = build_client(&plan.fetch)?;

    match execute(&client, &plan.fetch).await {
        Ok(outcome) => write_response(&outcome, plan.include_headers, plan.output.as_deref()),
        Err(err) => {
            error!("{}", err);
            Err(AppError::fetch(err))
        }
    }
}

fn build_plan(args: QgetArgs) -> AppResult<RunPlan> {
    let target = match args.url {
        Some(url) => url,
        None => {
            error!("Missing URL (set --url or provide in config).");
            return Err(AppError::validation(ValidationError::MissingUrl));
        }
    };
    let body = if args.data.is_empty() {
        None
    } else {
        Some(args.data)
    };

    Ok(RunPlan {
        fetch: FetchPlan {
            target,
            method: args.method,
            headers: args.headers,
            body,
            connect_timeout: args.connect_timeout,
            max_time: args.max_time,
            insecure: args.insecure,
            http3: args.http3,
        },
        include_headers: args.include,
        output: args.output,
    })
}
