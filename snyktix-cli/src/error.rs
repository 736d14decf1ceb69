//! CLI-specific error types and exit code mapping

use snyktix_core::error::SnyktixError;
use snyktix_issue_collector::IssueCollectorError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from snyktix-core.
    #[error("{0}")]
    Core(#[from] SnyktixError),

    /// Issue collection error.
    #[error("{0}")]
    Collector(#[from] IssueCollectorError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                      |
    /// |------|------------------------------|
    /// | 0    | Success                      |
    /// | 1    | General / command / API error |
    /// | 2    | Configuration error          |
    /// | 10   | IO error                     |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::Core(SnyktixError::Config(_)) => 2,
            Self::Core(SnyktixError::Io(_)) => 10,
            Self::Collector(IssueCollectorError::Config { .. }) => 2,
            Self::Collector(IssueCollectorError::Io { .. }) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) | Self::Collector(_) => 1,
        }
    }
}
