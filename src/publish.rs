//! Commit and push the converted outputs

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::select::unique_paths;
use crate::subprocess::{GitRunner, ProcessError};

pub const COMMITTER_EMAIL: &str = "autopy-lot@master";
pub const COMMITTER_NAME: &str = "autopy-lot action";
pub const COMMIT_MESSAGE: &str = "Add/Update autopy-lot outputs";
pub const REMOTE: &str = "origin";

/// What the publisher managed to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub staged: Vec<PathBuf>,
    pub committed: bool,
    pub pushed: bool,
}

pub struct Publisher<'a> {
    config: &'a Config,
    git: &'a dyn GitRunner,
    dry_run: bool,
}

impl<'a> Publisher<'a> {
    pub fn new(config: &'a Config, git: &'a dyn GitRunner) -> Self {
        Self {
            config,
            git,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    fn redact(&self, message: String) -> String {
        let token = self.config.token();
        if token.is_empty() {
            message
        } else {
            message.replace(token, "***")
        }
    }

    /// Log a failed git step; returns whether the step succeeded
    fn check(&self, step: &str, result: Result<(), ProcessError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("git {} failed: {}", step, self.redact(e.to_string()));
                false
            }
        }
    }

    /// Stage, commit and push `outputs` to the resolved branch.
    ///
    /// Git failures are reported as warnings. A failed commit skips the push.
    pub async fn publish(&self, outputs: &[PathBuf]) -> PublishReport {
        let staged = unique_paths(outputs.iter().cloned());
        if staged.is_empty() {
            info!("Nothing to add. Nothing to update!");
            return PublishReport::default();
        }

        let file_list = staged
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        if self.dry_run {
            info!(
                "Would commit {} to {} on {}",
                file_list, self.config.branch, self.config.repository
            );
            return PublishReport {
                staged,
                ..PublishReport::default()
            };
        }

        let root = &self.config.working_dir;
        let branch = &self.config.branch;

        self.check(
            "config user.email",
            self.git.config_local(root, "user.email", COMMITTER_EMAIL).await,
        );
        self.check(
            "config user.name",
            self.git.config_local(root, "user.name", COMMITTER_NAME).await,
        );
        self.check("checkout", self.git.checkout(root, branch).await);
        self.check("add", self.git.add(root, &staged).await);

        info!("Committing {}...", file_list);
        let committed = self.check("commit", self.git.commit(root, COMMIT_MESSAGE).await);
        if !committed {
            warn!("No commit was created, skipping push to {}", branch);
            return PublishReport {
                staged,
                committed,
                pushed: false,
            };
        }

        self.check(
            "remote set-url",
            self.git
                .set_remote_url(root, REMOTE, &self.config.authenticated_remote_url())
                .await,
        );
        let pushed = self.check("push", self.git.push(root, REMOTE, branch).await);
        if pushed {
            info!("Pushed outputs to {} on {}", branch, self.config.repository);
        }

        PublishReport {
            staged,
            committed,
            pushed,
        }
    }
}
