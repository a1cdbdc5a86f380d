//! Prepare command - run the release preparation pipeline for a tag

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use slipway_changelog::HttpChangelogSource;
use slipway_core::config::{load_config, load_config_or_default, Config};
use slipway_release::{PrepareOutcome, ReleasePrepareService};
use slipway_storage::{LocalArtifactStore, LocalDeployStore};
use slipway_updates::HttpUpdateApi;

use crate::cli::{Cli, OutputFormat};

/// Prepare a release for a tag
#[derive(Debug, Args)]
pub struct PrepareCommand {
    /// Release tag to prepare (e.g. "6.4.5")
    pub tag: String,

    /// Path to the configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl PrepareCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(tag = %self.tag, "executing prepare command");
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = self.load_config()?;
        let service = build_service(config)?;

        if !cli.quiet && cli.format == OutputFormat::Text {
            println!();
            println!("{}", style("Preparing release...").bold());
            println!("  Tag: {}", style(&self.tag).cyan());
            println!();
        }

        let outcome = match service.prepare_release(&self.tag).await {
            Ok(outcome) => outcome,
            Err(err @ slipway_release::PrepareError::Registration(_)) => {
                // The catalog was already saved at this point; only the
                // external registration is missing.
                eprintln!(
                    "{} Catalog for {} was saved, but registering with the update API failed.",
                    style("!").red().bold(),
                    self.tag
                );
                eprintln!(
                    "  Re-run `slipway prepare {}` to retry registration.",
                    self.tag
                );
                return Err(err.into());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to prepare release {}", self.tag));
            }
        };

        match outcome {
            PrepareOutcome::Completed { tag } => {
                if cli.format == OutputFormat::Json {
                    println!(
                        "{}",
                        serde_json::json!({ "tag": tag, "outcome": "completed" })
                    );
                } else if !cli.quiet {
                    println!("{} Release {} prepared", style("✓").green().bold(), tag);
                }
            }
            PrepareOutcome::Rejected { tag, reason } => {
                // A guard rejection is an expected outcome, not an error.
                if cli.format == OutputFormat::Json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "tag": tag,
                            "outcome": "rejected",
                            "reason": reason.to_string(),
                        })
                    );
                } else {
                    println!(
                        "{} Release {} skipped: {}",
                        style("!").yellow().bold(),
                        tag,
                        reason
                    );
                }
            }
        }

        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        if let Some(ref path) = self.config {
            return Ok(load_config(path)?);
        }
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        Ok(config)
    }
}

/// Wire the pipeline up from configuration
fn build_service(config: Config) -> anyhow::Result<ReleasePrepareService> {
    let deploy = Arc::new(LocalDeployStore::new(config.deploy.root.clone()));
    let artifacts = Arc::new(LocalArtifactStore::new(config.artifacts.root.clone()));
    let changelog = Arc::new(
        HttpChangelogSource::new(
            config.changelog.base_url.clone(),
            Duration::from_secs(config.changelog.timeout_secs),
        )
        .context("failed to build changelog client")?,
    );
    let update_api = Arc::new(
        HttpUpdateApi::new(
            config.update_api.base_url.clone(),
            Duration::from_secs(config.update_api.timeout_secs),
        )
        .context("failed to build update API client")?,
    );

    Ok(ReleasePrepareService::new(
        config, deploy, artifacts, changelog, update_api,
    ))
}
