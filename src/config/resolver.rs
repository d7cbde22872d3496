use std::fmt;
use std::path::PathBuf;

use super::env::VarEnv;
use crate::error::{Error, Result};

pub const DEFAULT_OUTPUT_DIR: &str = "./autopy-lot/";
pub const DEFAULT_CONVERTER: &str = "jupytext";
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Who and what triggered the workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub event_name: String,
    pub actor: String,
    pub repository_owner: String,
}

impl Trigger {
    pub fn is_pull_request(&self) -> bool {
        self.event_name == PULL_REQUEST_EVENT
    }

    /// Pull request opened by someone other than the repository owner.
    /// Runs triggered this way must not touch the repository.
    pub fn is_foreign_pull_request(&self) -> bool {
        self.is_pull_request() && self.actor != self.repository_owner
    }
}

/// Resolved action configuration. Built once, never mutated.
#[derive(Clone)]
pub struct Config {
    pub trigger: Trigger,
    /// Repository the outputs are pushed to (`owner/name`)
    pub repository: String,
    /// Branch the outputs are committed and pushed to
    pub branch: String,
    token: String,
    /// Raw `CHECK` input, validated by the file selector. `None` selects nothing.
    pub check: Option<String>,
    /// Extension of the files to convert, without the leading dot
    pub input_type: String,
    pub comment_magics: Option<String>,
    pub split_at_heading: Option<String>,
    pub output_type: Option<String>,
    pub output_dir: PathBuf,
    /// Converter program followed by its leading arguments
    pub converter: Vec<String>,
    pub working_dir: PathBuf,
}

impl Config {
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Remote URL with the access token embedded
    pub fn authenticated_remote_url(&self) -> String {
        format!(
            "https://x-access-token:{}@github.com/{}",
            self.token, self.repository
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("trigger", &self.trigger)
            .field("repository", &self.repository)
            .field("branch", &self.branch)
            .field("token", &"***")
            .field("check", &self.check)
            .field("input_type", &self.input_type)
            .field("comment_magics", &self.comment_magics)
            .field("split_at_heading", &self.split_at_heading)
            .field("output_type", &self.output_type)
            .field("output_dir", &self.output_dir)
            .field("converter", &self.converter)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

/// Builds [`Trigger`] and [`Config`] from environment variables
pub struct ConfigResolver<'a> {
    env: &'a dyn VarEnv,
    working_dir: PathBuf,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(env: &'a dyn VarEnv) -> Self {
        Self {
            env,
            working_dir: PathBuf::from("."),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Unset and empty variables are both absent
    fn optional(&self, key: &str) -> Option<String> {
        self.env.var(key).filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key)
            .ok_or_else(|| Error::MissingConfiguration(key.to_string()))
    }

    /// Resolve only the trigger context, enough to evaluate the PR guard
    pub fn trigger(&self) -> Result<Trigger> {
        Ok(Trigger {
            event_name: self.required("GITHUB_EVENT_NAME")?,
            actor: self.required("GITHUB_ACTOR")?,
            repository_owner: self.required("GITHUB_REPOSITORY_OWNER")?,
        })
    }

    pub fn resolve(&self) -> Result<Config> {
        let trigger = self.trigger()?;

        let current_repository = self.required("GITHUB_REPOSITORY")?;
        let target_repository = self
            .optional("INPUT_TARGET_REPOSITORY")
            .unwrap_or(current_repository);
        let pull_request_repository = self
            .optional("INPUT_PULL_REQUEST_REPOSITORY")
            .unwrap_or_else(|| target_repository.clone());

        let current_branch = match self.optional("GITHUB_HEAD_REF") {
            Some(head) => head,
            None => branch_from_ref(&self.required("GITHUB_REF")?),
        };
        let target_branch = self
            .optional("INPUT_TARGET_BRANCH")
            .unwrap_or(current_branch);
        let pull_request_branch = self
            .optional("INPUT_PULL_REQUEST_BRANCH")
            .or_else(|| self.optional("GITHUB_BASE_REF"))
            .unwrap_or_else(|| target_branch.clone());

        let (repository, branch) = if trigger.is_pull_request() {
            (pull_request_repository, pull_request_branch)
        } else {
            (target_repository, target_branch)
        };

        let token = self.required("INPUT_GITHUB_TOKEN")?;
        let check = self.optional("INPUT_CHECK");
        let input_type = self
            .required("INPUT_INPUT_TYPE")?
            .trim_start_matches('.')
            .to_string();

        let output_dir = self
            .optional("INPUT_OUTPUT_DIR")
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        let converter_line = self
            .optional("INPUT_CONVERTER")
            .unwrap_or_else(|| DEFAULT_CONVERTER.to_string());
        let converter = shell_words::split(&converter_line)
            .ok()
            .filter(|words| !words.is_empty())
            .ok_or_else(|| {
                Error::invalid_option("CONVERTER", converter_line.clone(), "a command line")
            })?;

        Ok(Config {
            trigger,
            repository,
            branch,
            token,
            check,
            input_type,
            comment_magics: self.optional("INPUT_COMMENT_MAGICS"),
            split_at_heading: self.optional("INPUT_SPLIT_AT_HEADING"),
            output_type: self.optional("INPUT_OUTPUT_TYPE"),
            output_dir: PathBuf::from(output_dir),
            converter,
            working_dir: self.working_dir.clone(),
        })
    }
}

/// Branch name from a git ref (`refs/heads/feature/x` → `feature/x`)
pub fn branch_from_ref(git_ref: &str) -> String {
    match git_ref.strip_prefix("refs/heads/") {
        Some(branch) => branch.to_string(),
        None => git_ref.rsplit('/').next().unwrap_or(git_ref).to_string(),
    }
}
