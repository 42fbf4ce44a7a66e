//! One-shot HTTP request execution.
mod client;
mod fetch;

#[cfg(test)]
mod test_support;

pub use client::build_client;
pub use fetch::{FetchOutcome, FetchPlan, execute};
