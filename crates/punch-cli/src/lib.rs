//! Time tracker CLI library.
//!
//! This crate provides the `punch` command-line interface: the presentation
//! layer over the engine in `punch-core` and the store in `punch-store`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
