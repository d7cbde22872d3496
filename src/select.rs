//! Input file selection
//!
//! `CHECK=all` walks the working tree, `CHECK=latest` asks git which files
//! the HEAD commit touched.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use glob::MatchOptions;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::subprocess::GitRunner;

pub const CHECK_ALL: &str = "all";
pub const CHECK_LATEST: &str = "latest";

/// Remove repeated paths, keeping the first occurrence of each
pub fn unique_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Drop `.`, `..` and root components so paths compare by their names only
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

pub struct FileSelector<'a> {
    config: &'a Config,
    git: &'a dyn GitRunner,
}

impl<'a> FileSelector<'a> {
    pub fn new(config: &'a Config, git: &'a dyn GitRunner) -> Self {
        Self { config, git }
    }

    /// Input files relative to the working directory
    pub async fn select(&self) -> Result<Vec<PathBuf>> {
        let files = match self.config.check.as_deref() {
            None => {
                info!("CHECK is not set, no input files selected");
                Vec::new()
            }
            Some(CHECK_ALL) => self.all_files()?,
            Some(CHECK_LATEST) => self.latest_files().await,
            Some(other) => {
                return Err(Error::invalid_option(
                    "CHECK",
                    other,
                    format!("{} or {}", CHECK_ALL, CHECK_LATEST),
                ))
            }
        };

        debug!("Selected {} {} file(s)", files.len(), self.config.input_type);
        Ok(unique_paths(files))
    }

    /// Output directory relative to the working directory, if it lies inside it
    fn output_dir(&self) -> Option<PathBuf> {
        let dir = &self.config.output_dir;
        if dir.is_absolute() {
            dir.strip_prefix(&self.config.working_dir).ok().map(normalize)
        } else {
            Some(normalize(dir))
        }
    }

    fn all_files(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.working_dir;
        let pattern = format!(
            "{}/**/*.{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            glob::Pattern::escape(&self.config.input_type)
        );
        // Hidden directories such as .git and .ipynb_checkpoints are skipped
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: true,
        };
        let output_dir = self.output_dir().filter(|dir| !dir.as_os_str().is_empty());

        let mut files = Vec::new();
        for entry in glob::glob_with(&pattern, options)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }

            let relative = normalize(path.strip_prefix(root).unwrap_or(path.as_path()));
            if let Some(ref output_dir) = output_dir {
                if relative.starts_with(output_dir) {
                    debug!("Skipping generated file {}", relative.display());
                    continue;
                }
            }
            files.push(relative);
        }

        Ok(files)
    }

    async fn latest_files(&self) -> Vec<PathBuf> {
        let root = &self.config.working_dir;
        let changed = match self.git.changed_in_head(root).await {
            Ok(changed) => changed,
            Err(e) => {
                warn!("Could not list files changed in HEAD: {}", e);
                return Vec::new();
            }
        };

        let suffix = format!(".{}", self.config.input_type);
        changed
            .into_iter()
            .filter(|file| file.ends_with(&suffix))
            .map(PathBuf::from)
            .filter(|file| {
                let present = root.join(file).is_file();
                if !present {
                    debug!("Skipping {} (deleted in HEAD)", file.display());
                }
                present
            })
            .collect()
    }
}
