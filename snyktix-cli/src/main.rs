use clap::Parser;
use colored::Colorize;

use snyktix_cli::cli::{Cli, Commands};
use snyktix_cli::commands;
use snyktix_cli::error::CliError;
use snyktix_cli::logging;
use snyktix_cli::output::OutputWriter;
use snyktix_core::config::SnyktixConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 로깅 초기화 (설정 파일이 깨져 있어도 기본값으로 진행)
    let general = SnyktixConfig::load_or_default(&cli.config)
        .await
        .map(|config| config.general)
        .unwrap_or_default();
    let general = logging::resolve_settings(general, cli.log_level.as_deref(), cli.debug);
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(2);
    }

    tracing::debug!(config = %cli.config.display(), "snyktix starting");

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut writer = OutputWriter::stdout(cli.output);
    match cli.command {
        Commands::Issues(args) => commands::issues::execute(args, &cli.config, &mut writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &mut writer).await,
    }
}
