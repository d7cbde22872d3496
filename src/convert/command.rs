use std::path::Path;

use tracing::warn;

use crate::config::Config;
use crate::subprocess::{ProcessCommand, ProcessCommandBuilder};

/// Extension used when no recognized output format is requested
pub const DEFAULT_EXTENSION: &str = "py";

/// The only value that switches a boolean input on
const ENABLED: &str = "true";

/// Output formats the converter is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Py,
    Ipynb,
    Markdown,
    R,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "py" => Some(OutputFormat::Py),
            "ipynb" => Some(OutputFormat::Ipynb),
            "markdown" => Some(OutputFormat::Markdown),
            "r" => Some(OutputFormat::R),
            _ => None,
        }
    }

    /// Value passed to `--to`
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Py => "py",
            OutputFormat::Ipynb => "ipynb",
            OutputFormat::Markdown => "markdown",
            OutputFormat::R => "r",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Py => "py",
            OutputFormat::Ipynb => "ipynb",
            OutputFormat::Markdown => "md",
            OutputFormat::R => "R",
        }
    }
}

/// Converter program, option arguments, and the extension of its outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    program: String,
    args: Vec<String>,
    extension: String,
}

impl ConverterCommand {
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the input path
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Full invocation for one file: `<command> <input> -o <output>`
    pub fn invocation(&self, input: &Path, output: &Path, working_dir: &Path) -> ProcessCommand {
        ProcessCommandBuilder::new(&self.program)
            .args(&self.args)
            .path_arg(input)
            .arg("-o")
            .path_arg(output)
            .current_dir(working_dir)
            .build()
    }
}

/// Assembles a [`ConverterCommand`] one option at a time
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    extension: String,
}

impl CommandBuilder {
    /// `converter` is the program followed by any leading arguments
    pub fn new(converter: &[String]) -> Self {
        let (program, leading) = match converter.split_first() {
            Some((program, rest)) => (program.clone(), rest.to_vec()),
            None => (crate::config::DEFAULT_CONVERTER.to_string(), Vec::new()),
        };
        Self {
            program,
            args: leading,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Options in the order the action has always passed them
    pub fn from_config(config: &Config) -> ConverterCommand {
        Self::new(&config.converter)
            .comment_magics(config.comment_magics.as_deref())
            .split_at_heading(config.split_at_heading.as_deref())
            .output_type(config.output_type.as_deref())
            .build()
    }

    fn toggle(mut self, input: &str, option: &str, value: Option<&str>) -> Self {
        match value {
            Some(ENABLED) => {
                self.args.push("--opt".to_string());
                self.args.push(format!("{}={}", option, ENABLED));
            }
            Some(other) => {
                warn!(
                    "Ignoring {}='{}': supported: --opt {}={}",
                    input, other, option, ENABLED
                );
            }
            None => {}
        }
        self
    }

    pub fn comment_magics(self, value: Option<&str>) -> Self {
        self.toggle("COMMENT_MAGICS", "comment_magics", value)
    }

    pub fn split_at_heading(self, value: Option<&str>) -> Self {
        self.toggle("SPLIT_AT_HEADING", "split_at_heading", value)
    }

    pub fn output_type(mut self, value: Option<&str>) -> Self {
        let Some(value) = value else {
            return self;
        };

        match OutputFormat::parse(value) {
            Some(format) => {
                self.args.push("--to".to_string());
                self.args.push(format.name().to_string());
                self.extension = format.extension().to_string();
            }
            None => {
                warn!(
                    "Ignoring OUTPUT_TYPE='{}': supported: py, ipynb, markdown, r",
                    value
                );
            }
        }
        self
    }

    pub fn build(self) -> ConverterCommand {
        ConverterCommand {
            program: self.program,
            args: self.args,
            extension: self.extension,
        }
    }
}
