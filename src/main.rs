mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod output;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
