//! Scripted [`ProcessRunner`] for tests
//!
//! Expectations are tried in the order they were registered; the first one
//! whose program and argument matcher fit the command answers it. Every
//! command is recorded, answered or not.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::ProcessError;
use super::runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner};

type ArgsPredicate = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

enum ArgsMatch {
    Any,
    /// First argument, e.g. `commit` in `git commit -m ...`
    Subcommand(String),
    Custom(ArgsPredicate),
}

impl ArgsMatch {
    fn matches(&self, args: &[String]) -> bool {
        match self {
            ArgsMatch::Any => true,
            ArgsMatch::Subcommand(name) => args.first() == Some(name),
            ArgsMatch::Custom(predicate) => predicate(args),
        }
    }
}

struct Expectation {
    program: String,
    args: ArgsMatch,
    response: ProcessOutput,
    /// Calls left before the expectation starts failing, `None` for unlimited
    remaining: Option<usize>,
}

#[derive(Default)]
struct MockState {
    expectations: Vec<Expectation>,
    calls: Vec<ProcessCommand>,
}

/// Process runner that answers from registered expectations
#[derive(Clone, Default)]
pub struct MockProcessRunner {
    state: Arc<Mutex<MockState>>,
}

/// One expectation under construction, registered by [`MockCommandConfig::finish`]
pub struct MockCommandConfig {
    state: Arc<Mutex<MockState>>,
    expectation: Expectation,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an expectation for `program`; answers with success and no output
    /// unless configured otherwise
    pub fn expect_command(&mut self, program: &str) -> MockCommandConfig {
        MockCommandConfig {
            state: Arc::clone(&self.state),
            expectation: Expectation {
                program: program.to_string(),
                args: ArgsMatch::Any,
                response: ProcessOutput {
                    status: ExitStatus::Success,
                    stdout: String::new(),
                    stderr: String::new(),
                    duration: Duration::ZERO,
                },
                remaining: None,
            },
        }
    }

    pub fn verify_called(&self, program: &str, times: usize) -> bool {
        self.calls_to(program).len() == times
    }

    pub fn get_call_history(&self) -> Vec<ProcessCommand> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Argument lists of every recorded call to `program`, in call order
    pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|cmd| cmd.program == program)
            .map(|cmd| cmd.args.clone())
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(command.clone());

        let expectation = state
            .expectations
            .iter_mut()
            .find(|e| e.program == command.program && e.args.matches(&command.args))
            .ok_or_else(|| {
                ProcessError::MockExpectationNotMet(format!(
                    "no expectation for `{}`",
                    command.display()
                ))
            })?;

        match expectation.remaining {
            Some(0) => Err(ProcessError::MockExpectationNotMet(format!(
                "`{}` called more often than expected",
                command.display()
            ))),
            Some(ref mut left) => {
                *left -= 1;
                Ok(expectation.response.clone())
            }
            None => Ok(expectation.response.clone()),
        }
    }
}

impl MockCommandConfig {
    pub fn with_args<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.expectation.args = ArgsMatch::Custom(Box::new(matcher));
        self
    }

    /// Only answer commands whose first argument is `name`
    pub fn with_subcommand(mut self, name: &str) -> Self {
        self.expectation.args = ArgsMatch::Subcommand(name.to_string());
        self
    }

    pub fn returns_stdout(mut self, stdout: &str) -> Self {
        self.expectation.response.stdout = stdout.to_string();
        self
    }

    pub fn returns_stderr(mut self, stderr: &str) -> Self {
        self.expectation.response.stderr = stderr.to_string();
        self
    }

    pub fn returns_exit_code(mut self, code: i32) -> Self {
        self.expectation.response.status = match code {
            0 => ExitStatus::Success,
            code => ExitStatus::Error(code),
        };
        self
    }

    pub fn returns_success(self) -> Self {
        self.returns_exit_code(0)
    }

    pub fn times(mut self, n: usize) -> Self {
        self.expectation.remaining = Some(n);
        self
    }

    pub fn finish(self) {
        self.state.lock().unwrap().expectations.push(self.expectation);
    }
}
