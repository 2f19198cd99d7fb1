use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "isleweave")]
#[command(about = "Static site generator driven by marked markup islands", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debugging
    #[arg(short = 'g', long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Only report errors
    #[arg(short, long, global = true, default_value_t = false, conflicts_with = "debug")]
    pub quiet: bool,
}

/// Options shared by every command that reads a site
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Source directory (defaults to ./)
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Custom configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<Vec<PathBuf>>,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Build every page of the site
    #[command(alias = "b")]
    Build {
        #[command(flatten)]
        site: SourceArgs,

        /// Destination directory (defaults to the configured destination)
        #[arg(short, long, value_name = "DIR")]
        destination: Option<PathBuf>,

        /// JSON object layered over every page's data
        #[arg(long, value_name = "JSON")]
        data: Option<String>,
    },

    /// Compile a single page and print it
    #[command(alias = "p")]
    Page {
        /// Registry key of the page, e.g. `blog/index`
        key: String,

        #[command(flatten)]
        site: SourceArgs,

        /// JSON object layered over the page's data
        #[arg(long, value_name = "JSON")]
        data: Option<String>,
    },

    /// Remove the destination directory
    Clean {
        #[command(flatten)]
        site: SourceArgs,

        /// Destination directory (defaults to the configured destination)
        #[arg(short, long, value_name = "DIR")]
        destination: Option<PathBuf>,
    },
}
