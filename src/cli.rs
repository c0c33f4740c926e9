//! Command-line interface definition

use crate::config::Settings;
use crate::report::{ConsoleReporter, Reporter, TracingReporter};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level CLI definition for censys-asm-search.
#[derive(Parser, Debug)]
#[command(name = "censys-asm-search", version)]
#[command(
    about = "Run Censys Search queries against the hosts stored in Censys ASM",
    long_about = "Censys ASM Search requires both regular Censys Search API credentials \
                  (CENSYS_API_UID, CENSYS_API_SECRET) and a Censys ASM API key \
                  (CENSYS_ASM_API_KEY) to work."
)]
pub struct Cli {
    /// Censys Search query, combined with the ASM host list.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only search hosts carrying these ASM tags.
    #[arg(short, long = "filter-tags", num_args = 0.., value_name = "TAG")]
    pub filter_tags: Option<Vec<String>>,

    /// Write the matched hosts, comma separated, to this file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Alternate Censys Search API location. Not recommended.
    #[arg(long, alias = "API-URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Alternate Censys ASM API location. Not recommended.
    #[arg(long, alias = "ASM-API-URL", value_name = "URL")]
    pub asm_api_url: Option<String>,

    /// Print the current API settings and exit.
    #[arg(long, alias = "API-CHECK", default_value_t = false)]
    pub api_check: bool,

    /// Path to a YAML settings file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of hosts combined into one search query.
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Send progress to the log instead of the console and print only the
    /// matched hosts, one per line.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Reporter for progress messages
    pub fn reporter(&self) -> Arc<dyn Reporter> {
        if self.quiet {
            Arc::new(TracingReporter)
        } else {
            Arc::new(ConsoleReporter)
        }
    }

    /// Apply command-line overrides on top of file and environment settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(ref url) = self.api_url {
            settings.search.url = url.clone();
        }
        if let Some(ref url) = self.asm_api_url {
            settings.asm.url = url.clone();
        }
        if let Some(size) = self.batch_size {
            settings.batch_size = size;
        }
    }

    /// Tracing filter used when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "censys_asm_search=info",
            _ => "censys_asm_search=debug",
        }
    }
}
