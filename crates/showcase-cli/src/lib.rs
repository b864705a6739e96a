//! Showcase CLI Library
//!
//! Command-line driver for the animation showcase. Every command builds a
//! fresh page, runs it in virtual time and prints what happened.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    ClickArgs, Cli, ColorArg, Commands, ConfigArgs, CounterArgs, PaletteArgs, PolicyArg,
    SimulateArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Reporter;
