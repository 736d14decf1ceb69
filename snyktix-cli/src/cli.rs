//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative apart from [`IssuesArgs::apply_overrides`], which
//! folds command-line flags into the loaded configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use snyktix_core::config::SnyktixConfig;

/// snyktix -- list Snyk issues that do not have a ticket yet.
///
/// Use `snyktix <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "snyktix", version, about, long_about = None)]
pub struct Cli {
    /// Path to the snyktix.toml configuration file.
    #[arg(short, long, default_value = "snyktix.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Enable debug logging (same as `--log-level debug`).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect issues without tickets for one or more projects.
    Issues(IssuesArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- issues ----

/// Collect open issues that have no ticket yet.
///
/// Flags override the matching values from the configuration file.
#[derive(Args, Debug, Default)]
pub struct IssuesArgs {
    /// Snyk organization ID.
    #[arg(long)]
    pub org_id: Option<String>,

    /// Snyk project ID (repeat for several projects).
    #[arg(long = "project-id", required = true)]
    pub project_ids: Vec<String>,

    /// Snyk API token.
    #[arg(long)]
    pub api_token: Option<String>,

    /// Snyk v1 API base URL.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Snyk REST API base URL (code issues).
    #[arg(long)]
    pub rest_endpoint: Option<String>,

    /// Severity threshold (critical, high, medium, low).
    #[arg(long)]
    pub severity: Option<String>,

    /// Issue type (all, vuln, license, configuration).
    #[arg(long = "type")]
    pub issue_type: Option<String>,

    /// Minimum priority score (0-1000).
    #[arg(long)]
    pub priority_score: Option<u32>,

    /// Exploit maturity filter, comma separated
    /// (no-data, no-known-exploit, proof-of-concept, mature).
    #[arg(long, value_delimiter = ',')]
    pub maturity: Vec<String>,

    /// JSON file mapping issue IDs to existing ticket keys.
    #[arg(long)]
    pub tickets: Option<PathBuf>,
}

impl IssuesArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply_overrides(&self, config: &mut SnyktixConfig) {
        override_from(&mut config.snyk.org_id, &self.org_id);
        override_from(&mut config.snyk.api_token, &self.api_token);
        override_from(&mut config.snyk.endpoint, &self.endpoint);
        override_from(&mut config.snyk.rest_endpoint, &self.rest_endpoint);
        override_from(&mut config.filter.severity, &self.severity);
        override_from(&mut config.filter.issue_type, &self.issue_type);
        if let Some(score) = self.priority_score {
            config.filter.priority_score_threshold = score;
        }
        if !self.maturity.is_empty() {
            config.filter.maturity = self.maturity.clone();
        }
    }
}

fn override_from(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

// ---- config ----

/// Manage snyktix configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, snyk, filter).
        #[arg(long)]
        section: Option<String>,
    },
}
