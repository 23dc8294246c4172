//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through the remote photo collection
#[derive(Parser, Debug)]
#[command(name = "photo-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the endpoint base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a single page
    Page {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Items per page (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Walk the collection page by page until it runs out
    Browse {
        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Items per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::parse_from(["photo-pager", "page", "--page", "3", "--limit", "10"]);
        assert!(matches!(
            cli.command,
            Commands::Page {
                page: 3,
                limit: Some(10)
            }
        ));
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "photo-pager",
            "browse",
            "--max-pages",
            "2",
            "--format",
            "json",
            "--base-url",
            "http://localhost:3000/",
            "-v",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Browse {
                max_pages: Some(2),
                page_size: None
            }
        ));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:3000/"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_page_defaults_to_first() {
        let cli = Cli::parse_from(["photo-pager", "page"]);
        assert!(matches!(
            cli.command,
            Commands::Page {
                page: 1,
                limit: None
            }
        ));
    }
}
