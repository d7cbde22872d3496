use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::command::ConverterCommand;
use crate::config::Config;
use crate::error::Result;
use crate::subprocess::{check_output, ProcessError, ProcessRunner};

/// Where the converted copy of `input` is written.
///
/// The input's directory structure is kept below `output_dir` and its
/// extension replaced: `a/nb1.ipynb` → `./autopy-lot/a/nb1.py`.
pub fn output_path(output_dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let relative: PathBuf = input
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    output_dir.join(relative).with_extension(extension)
}

/// Runs the converter once per input file
pub struct Converter<'a> {
    config: &'a Config,
    command: &'a ConverterCommand,
    runner: Arc<dyn ProcessRunner>,
    dry_run: bool,
}

impl<'a> Converter<'a> {
    pub fn new(
        config: &'a Config,
        command: &'a ConverterCommand,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            config,
            command,
            runner,
            dry_run: false,
        }
    }

    /// Log each invocation instead of running it
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Convert every file and return the outputs that were produced.
    ///
    /// A file whose conversion fails is reported and left out of the result;
    /// the remaining files are still converted.
    pub async fn convert_all(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if !self.dry_run {
            std::fs::create_dir_all(self.config.working_dir.join(&self.config.output_dir))?;
        }

        let mut outputs = Vec::with_capacity(files.len());
        for file in files {
            let output = output_path(&self.config.output_dir, file, self.command.extension());
            match self.convert_one(file, &output).await {
                Ok(()) => {
                    info!("converting: {} -> {}", file.display(), output.display());
                    outputs.push(output);
                }
                Err(e) => {
                    warn!("Conversion of {} failed, not committing it: {}", file.display(), e);
                }
            }
        }

        Ok(outputs)
    }

    async fn convert_one(&self, input: &Path, output: &Path) -> std::result::Result<(), ProcessError> {
        let invocation = self
            .command
            .invocation(input, output, &self.config.working_dir);

        if self.dry_run {
            info!("Would run: {}", invocation.display());
            return Ok(());
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(self.config.working_dir.join(parent))?;
        }

        let result = self.runner.run(invocation.clone()).await?;
        check_output(&invocation, &result)
    }
}
