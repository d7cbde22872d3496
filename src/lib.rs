//! # autopylot
//!
//! GitHub Action that converts notebooks, scripts and R markdown files with
//! `jupytext` and pushes the paired outputs back to the repository.
//!
//! ## Modules
//!
//! - `app` - Command-line settings, logging and fatal error handling
//! - `config` - Action inputs resolved from the environment into an immutable `Config`
//! - `select` - Input file selection (`CHECK=all` or `CHECK=latest`)
//! - `convert` - Converter command assembly and per-file invocation
//! - `publish` - Commit and push of the converted outputs
//! - `pipeline` - The run from configuration to push
//! - `subprocess` - Unified subprocess abstraction layer for testing
pub mod app;
pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod publish;
pub mod select;
pub mod subprocess;

pub use error::{Error, Result};
pub use pipeline::{ConversionPipeline, RunOutcome};
