//! `snyktix config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use snyktix_core::config::SnyktixConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Placeholder written in place of secrets.
pub const REDACTED: &str = "***REDACTED***";

const SECTIONS: [&str; 3] = ["general", "snyk", "filter"];

/// Execute the `config` command.
pub async fn execute<W: Write>(
    args: ConfigArgs,
    config_path: &Path,
    writer: &mut OutputWriter<W>,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Execute the config validate subcommand.
///
/// # Errors
///
/// Returns `CliError::Config` if the file is missing or does not validate.
async fn execute_validate<W: Write>(
    config_path: &Path,
    writer: &mut OutputWriter<W>,
) -> Result<(), CliError> {
    let report = validation_report(config_path).await;
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

/// Execute the config show subcommand.
async fn execute_show<W: Write>(
    config_path: &Path,
    section: Option<String>,
    writer: &mut OutputWriter<W>,
) -> Result<(), CliError> {
    let report = show_report(config_path, section.as_deref()).await?;
    writer.render(&report)?;
    Ok(())
}

/// Load `config_path` strictly and describe the outcome.
///
/// A missing file counts as invalid here, unlike the other commands
/// which fall back to defaults.
pub async fn validation_report(config_path: &Path) -> ConfigValidationReport {
    info!(path = %config_path.display(), "validating configuration");

    let source = config_path.display().to_string();
    match SnyktixConfig::load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source,
            valid: false,
            errors: vec![e.to_string()],
        },
    }
}

/// Build the effective configuration report (file + env overrides + defaults).
///
/// The API token is redacted before serialisation.
///
/// # Errors
///
/// Returns `CliError::Core` if loading fails or `CliError::Command` if
/// the section name is unknown.
pub async fn show_report(
    config_path: &Path,
    section: Option<&str>,
) -> Result<ConfigReport, CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let mut config = SnyktixConfig::load_or_default(config_path).await?;
    redact_credentials(&mut config);

    let config_toml = match section {
        None => toml::to_string_pretty(&config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("snyk") => toml::to_string_pretty(&config.snyk),
        Some("filter") => toml::to_string_pretty(&config.filter),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    }
    .unwrap_or_else(|e| format!("(serialization error: {})", e));

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section: section.map(str::to_owned),
        config_toml,
    })
}

/// Replace a configured API token with [`REDACTED`].
fn redact_credentials(config: &mut SnyktixConfig) {
    if !config.snyk.api_token.is_empty() {
        config.snyk.api_token = REDACTED.to_owned();
    }
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only used for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration (token redacted)
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
