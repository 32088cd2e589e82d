//! `mdsbom-action render` command handler
//!
//! Composes the provisioning script from the current inputs and prints it.
//! Nothing is downloaded or executed.

use std::io::Write;

use serde::Serialize;

use mdsbom_core::types::{HostVariant, ProvisionedArtifact};
use mdsbom_core::RunConfig;
use mdsbom_provisioner::{ProvisionScript, compose, download_url};

use crate::cli::RenderArgs;
use crate::error::CliError;
use crate::github::GithubHost;
use crate::output::{OutputWriter, Render};

pub fn execute(args: RenderArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let resolved = RunConfig::resolve(&GithubHost::stdout());
    let config = if args.show_secrets {
        resolved
    } else {
        resolved.redacted()
    };

    let report = RenderReport::build(&config, args.artifact)?;
    writer.render(&report)
}

#[derive(Serialize)]
pub struct RenderReport {
    pub download_url: String,
    pub artifact: String,
    pub stages: Vec<&'static str>,
    pub script: String,
}

impl RenderReport {
    fn build(config: &RunConfig, artifact: std::path::PathBuf) -> Result<Self, CliError> {
        let url = download_url(config.service_base_url(), HostVariant::default());
        let artifact = ProvisionedArtifact::new(artifact, url);
        let script: ProvisionScript = compose(config, &artifact)?;

        Ok(Self {
            download_url: artifact.source_url().to_owned(),
            artifact: artifact.path().display().to_string(),
            stages: script.stages().iter().map(|s| s.as_str()).collect(),
            script: script.render(),
        })
    }
}

impl Render for RenderReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        // Plain script so the output can be piped into a shell
        w.write_all(self.script.as_bytes())
    }
}
