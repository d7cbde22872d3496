use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration: environment variable {0} is not set")]
    MissingConfiguration(String),

    #[error("{value} is a wrong value for {option}. Expecting {expected}")]
    InvalidOption {
        option: String,
        value: String,
        expected: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    pub fn invalid_option(
        option: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Error::InvalidOption {
            option: option.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Whether the error comes from the action inputs rather than the host
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::MissingConfiguration(_) | Error::InvalidOption { .. }
        )
    }

    /// Process exit code used by the binary
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration_error() {
            2
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
