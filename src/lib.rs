//! Shared logging facility for build configuration tools.
//!
//! A [`LogSink`](logging::LogSink) writes every message to a persistent log
//! file and a filtered subset to the console. On an interactive terminal the
//! console line is rewritten in place, so progress messages do not scroll;
//! otherwise output scrolls normally.
//!
//! The public API is organised into two layers:
//!
//! - **[`config`]**: resolve logging options from the command line and a
//!   stored TOML file
//! - **[`logging`]**: the sink, its shared registry, and the debug formatter
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
