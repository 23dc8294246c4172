//! CLI module
//!
//! Command-line front end over the paging library.
//!
//! # Commands
//!
//! - `page` - Load a single page and show its keys
//! - `browse` - Walk the collection from the first page
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
