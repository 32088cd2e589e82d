//! `mdsbom-action inputs` command handler

use std::io::Write;

use serde::Serialize;

use mdsbom_core::RunConfig;

use crate::error::CliError;
use crate::github::GithubHost;
use crate::output::{OutputWriter, Render};

/// Print the configuration the action would run with. The token is always redacted.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    let config = RunConfig::resolve(&GithubHost::stdout());
    let report = InputsReport {
        config: config.redacted(),
        valid: config.validate().err().map(|e| e.to_string()),
    };
    writer.render(&report)
}

#[derive(Serialize)]
pub struct InputsReport {
    #[serde(flatten)]
    pub config: RunConfig,
    /// Validation failure, if any. `None` means the configuration passes `--strict`.
    #[serde(rename = "validation_error")]
    pub valid: Option<String>,
}

impl Render for InputsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let c = &self.config;
        writeln!(w, "Service URL:      {}", c.service_base_url())?;
        writeln!(w, "Token:            {}", display_or_unset(c.auth_token()))?;
        writeln!(w, "Workspace:        {}", display_or_unset(c.workspace_id()))?;
        writeln!(w, "Image:            {}", display_or_unset(c.image_ref()))?;
        writeln!(w, "Command:          {}", c.scan_command())?;
        writeln!(w, "SARIF output:     {}", display_or_unset(c.sarif_output_path()))?;
        writeln!(w, "Fail on defects:  {}", c.fail_on_defects())?;
        if let Some(reason) = &self.valid {
            use colored::Colorize;
            writeln!(w, "{} {reason}", "Invalid:".yellow())?;
        }
        Ok(())
    }
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}
