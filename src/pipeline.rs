//! The conversion pipeline
//!
//! One run walks `Idle → Configuring → Selecting → Converting →
//! {Idle | Publishing} → Done` exactly once. There are no retries and nothing
//! is rolled back.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{Config, ConfigResolver, Trigger, VarEnv};
use crate::convert::{CommandBuilder, Converter};
use crate::error::Result;
use crate::publish::{PublishReport, Publisher};
use crate::select::FileSelector;
use crate::subprocess::SubprocessManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Configuring,
    Selecting,
    Converting,
    Publishing,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Configuring => "configuring",
            PipelineState::Selecting => "selecting",
            PipelineState::Converting => "converting",
            PipelineState::Publishing => "publishing",
            PipelineState::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Pull request from someone other than the repository owner
    Skipped,
    /// No input file matched the selection
    NothingModified,
    /// Every conversion failed
    NothingConverted,
    Published(PublishReport),
    /// Dry run: what would have been converted and committed
    Planned(PublishReport),
}

fn enter(state: &mut PipelineState, next: PipelineState) {
    debug!("Pipeline state: {} -> {}", state, next);
    *state = next;
}

fn log_skip(trigger: &Trigger) {
    info!(
        "Skipping: pull request by {} is not from repository owner {}",
        trigger.actor, trigger.repository_owner
    );
}

pub struct ConversionPipeline {
    config: Config,
    subprocess: SubprocessManager,
    dry_run: bool,
}

impl ConversionPipeline {
    pub fn new(config: Config, subprocess: SubprocessManager) -> Self {
        Self {
            config,
            subprocess,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Resolve the configuration from `env` and run the pipeline.
    ///
    /// The pull-request guard is checked on the trigger alone, before the
    /// rest of the inputs are required.
    pub async fn run_from_env(
        env: &dyn VarEnv,
        working_dir: impl Into<PathBuf>,
        dry_run: bool,
        subprocess: SubprocessManager,
    ) -> Result<RunOutcome> {
        let mut state = PipelineState::Idle;
        enter(&mut state, PipelineState::Configuring);

        let resolver = ConfigResolver::new(env).with_working_dir(working_dir);
        let trigger = resolver.trigger()?;
        if trigger.is_foreign_pull_request() {
            log_skip(&trigger);
            enter(&mut state, PipelineState::Done);
            return Ok(RunOutcome::Skipped);
        }

        let config = resolver.resolve()?;
        debug!("Resolved configuration: {:?}", config);

        Self::new(config, subprocess).dry_run(dry_run).run().await
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let mut state = PipelineState::Configuring;
        let config = &self.config;

        if config.trigger.is_foreign_pull_request() {
            log_skip(&config.trigger);
            enter(&mut state, PipelineState::Done);
            return Ok(RunOutcome::Skipped);
        }

        let command = CommandBuilder::from_config(config);
        let git = self.subprocess.git();

        enter(&mut state, PipelineState::Selecting);
        let files = FileSelector::new(config, &git).select().await?;
        if files.is_empty() {
            info!(
                "No {} files selected with CHECK={}, nothing modified",
                config.input_type,
                config.check.as_deref().unwrap_or("")
            );
            enter(&mut state, PipelineState::Idle);
            return Ok(RunOutcome::NothingModified);
        }

        enter(&mut state, PipelineState::Converting);
        let outputs = Converter::new(config, &command, self.subprocess.runner())
            .dry_run(self.dry_run)
            .convert_all(&files)
            .await?;
        if outputs.is_empty() {
            info!("Nothing to add. Nothing to update!");
            enter(&mut state, PipelineState::Idle);
            return Ok(RunOutcome::NothingConverted);
        }

        enter(&mut state, PipelineState::Publishing);
        let report = Publisher::new(config, &git)
            .dry_run(self.dry_run)
            .publish(&outputs)
            .await;

        enter(&mut state, PipelineState::Done);
        if self.dry_run {
            Ok(RunOutcome::Planned(report))
        } else {
            Ok(RunOutcome::Published(report))
        }
    }
}
