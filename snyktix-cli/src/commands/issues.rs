//! `snyktix issues` command handler

use std::io::Write;
use std::path::Path;

use serde::ser::{Serialize, Serializer};
use tracing::info;

use snyktix_core::config::SnyktixConfig;
use snyktix_core::types::Severity;
use snyktix_issue_collector::{
    CollectorConfig, IssueCollector, IssueQuery, ProjectIssues, TicketIndex,
};

use crate::cli::IssuesArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `issues` command.
pub async fn execute<W: Write>(
    args: IssuesArgs,
    config_path: &Path,
    writer: &mut OutputWriter<W>,
) -> Result<(), CliError> {
    let report = run(&args, config_path).await?;
    writer.render(&report)?;
    Ok(())
}

/// Resolve configuration, collect every requested project and build the report.
///
/// Configuration and filter errors surface before any request is sent.
pub async fn run(args: &IssuesArgs, config_path: &Path) -> Result<IssuesReport, CliError> {
    let mut config = SnyktixConfig::load_or_default(config_path).await?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let query = IssueQuery::from_filter_config(&config.filter)?;

    let tickets = match &args.tickets {
        Some(path) => TicketIndex::load(path).await?,
        None => TicketIndex::new(),
    };

    info!(
        org_id = %config.snyk.org_id,
        projects = args.project_ids.len(),
        severity = %query.severity_threshold(),
        tickets = tickets.len(),
        "collecting issues"
    );

    let collector = IssueCollector::connect(CollectorConfig::from_core(&config.snyk))?;
    let projects = collector
        .collect_many(args.project_ids.as_slice(), &query, &tickets)
        .await?;

    Ok(IssuesReport { projects })
}

/// Issues without tickets, grouped by project.
///
/// Serialises as `{project_id: {issue_id: record}}`.
pub struct IssuesReport {
    pub projects: Vec<ProjectIssues>,
}

impl IssuesReport {
    /// Total number of issues across all projects.
    pub fn total(&self) -> usize {
        self.projects.iter().map(|p| p.issues.len()).sum()
    }
}

impl Serialize for IssuesReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.projects
                .iter()
                .map(|project| (&project.project_id, &project.issues)),
        )
    }
}

impl Render for IssuesReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for project in &self.projects {
            writeln!(
                w,
                "Project {} ({} issues)",
                project.project_id.bold(),
                project.issues.len()
            )?;

            if project.issues.is_empty() {
                writeln!(w, "  No issues without tickets.")?;
                continue;
            }

            writeln!(
                w,
                "  {:<40} {:<8} {:<10} Title",
                "ID", "Kind", "Severity"
            )?;
            for issue in project.issues.iter() {
                let severity = match issue.severity {
                    Some(severity) => colorize_severity(severity),
                    None => "-".normal(),
                };
                writeln!(
                    w,
                    "  {:<40} {:<8} {:<10} {}",
                    issue.id,
                    issue.kind.as_str(),
                    severity,
                    issue.title
                )?;
            }
        }

        writeln!(w)?;
        writeln!(w, "Total: {}", self.total())?;
        Ok(())
    }
}

fn colorize_severity(severity: Severity) -> colored::ColoredString {
    use colored::Colorize;

    match severity {
        Severity::Critical => severity.as_str().red().bold(),
        Severity::High => severity.as_str().red(),
        Severity::Medium => severity.as_str().yellow(),
        Severity::Low => severity.as_str().normal(),
    }
}
