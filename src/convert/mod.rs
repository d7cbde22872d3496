//! Converter invocation
//!
//! [`CommandBuilder`] turns the option inputs into a structured argument list
//! and [`Converter`] runs it once per selected file.

mod command;
mod converter;

pub use command::{CommandBuilder, ConverterCommand, OutputFormat, DEFAULT_EXTENSION};
pub use converter::{output_path, Converter};
