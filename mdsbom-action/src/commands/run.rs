//! `mdsbom-action run` command handler

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use mdsbom_core::types::RunOutcome;
use mdsbom_provisioner::{
    ActionStatus, ExecutionReport, HostRunner, HttpFetcher, ProvisionAction, RunOptions,
    run_action,
};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::github::GithubHost;
use crate::output::{OutputWriter, Render};

/// Execute the full action against the runner host.
pub async fn execute(args: RunArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let host = GithubHost::stdout();
    let fetcher = HttpFetcher::from_env();
    info!(dest_dir = %fetcher.dest_dir().display(), strict = args.strict, "starting mdsbom action");

    let action = ProvisionAction::new(Arc::new(fetcher), Arc::new(HostRunner));
    let status = run_action(&host, &action, RunOptions { strict: args.strict }).await;

    writer.render(&RunReport::from(&status))?;

    match status {
        ActionStatus::Completed(_) => Ok(()),
        ActionStatus::Failed { message, .. } => Err(CliError::Failed(message)),
    }
}

#[derive(Serialize)]
pub struct RunReport {
    pub failed: bool,
    pub exit_code: Option<i32>,
    pub outcome: Option<RunOutcome>,
    pub message: Option<String>,
}

impl From<&ActionStatus> for RunReport {
    fn from(status: &ActionStatus) -> Self {
        match status {
            ActionStatus::Completed(report) => Self::completed(report),
            ActionStatus::Failed { message, report } => Self {
                failed: true,
                exit_code: report.as_ref().and_then(|r| r.exit_code),
                outcome: report.as_ref().and_then(|r| r.outcome),
                message: Some(message.clone()),
            },
        }
    }
}

impl RunReport {
    fn completed(report: &ExecutionReport) -> Self {
        Self {
            failed: false,
            exit_code: report.exit_code,
            outcome: report.outcome,
            message: report.outcome.map(|o| o.message().to_owned()),
        }
    }
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let status = if self.failed {
            "failed".red().bold()
        } else {
            "completed".green().bold()
        };
        writeln!(w, "mdsbom action: {status}")?;

        match self.exit_code {
            Some(code) => writeln!(w, "Exit code: {code}")?,
            None if self.failed => {}
            None => writeln!(w, "Exit code: none (terminated by signal)")?,
        }

        match self.outcome {
            Some(outcome) => writeln!(w, "Outcome: {outcome:?}")?,
            None if self.exit_code.is_some() => {
                writeln!(w, "Outcome: {}", "unclassified".yellow())?;
            }
            None => {}
        }

        Ok(())
    }
}
