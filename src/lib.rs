//! Core library for the `qget` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, request execution, and response
//! output. The primary user-facing interface is the `qget` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod output;
