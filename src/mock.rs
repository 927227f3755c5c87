//! Mock process runner for testing without the capture binary.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::capture::{ProcessOutput, ProcessRunner};

/// How the mock process behaves when run.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Exit successfully without diagnostics.
    Succeed,
    /// Exit with a failure status.
    Fail,
    /// Exit successfully but write to the error stream.
    Stderr(String),
    /// The program cannot be started.
    Unavailable,
}

/// Recorded invocation: program and arguments.
pub type Call = (PathBuf, Vec<OsString>);

/// Process runner that records calls and returns a canned outcome.
#[derive(Debug, Clone)]
pub struct MockRunner {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a runner whose processes succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Succeed)
    }

    /// Create a runner whose processes exit with a failure status.
    #[must_use]
    pub fn failing() -> Self {
        Self::with_behavior(MockBehavior::Fail)
    }

    /// Create a runner whose processes write `stderr` and exit successfully.
    #[must_use]
    pub fn with_stderr(stderr: &str) -> Self {
        Self::with_behavior(MockBehavior::Stderr(stderr.to_owned()))
    }

    /// Create a runner that cannot start any program.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::with_behavior(MockBehavior::Unavailable)
    }

    /// Create a runner with the given behavior.
    #[must_use]
    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Calls recorded so far, shared between clones.
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProcessRunner for MockRunner {
    async fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ProcessOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((program.to_path_buf(), args.to_vec()));
        }

        match &self.behavior {
            MockBehavior::Succeed => Ok(ProcessOutput {
                success: true,
                stderr: Vec::new(),
            }),
            MockBehavior::Fail => Ok(ProcessOutput {
                success: false,
                stderr: Vec::new(),
            }),
            MockBehavior::Stderr(stderr) => Ok(ProcessOutput {
                success: true,
                stderr: stderr.clone().into_bytes(),
            }),
            MockBehavior::Unavailable => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "mock program not found",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_runner_records_calls() {
        let runner = MockRunner::new();
        let clone = runner.clone();

        let output = runner
            .run(Path::new("raspistill"), &[OsString::from("-o")])
            .await
            .expect("run should succeed");
        assert!(output.success);
        assert!(output.stderr.is_empty());

        assert_eq!(clone.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_runner_behaviors() {
        let output = MockRunner::failing()
            .run(Path::new("x"), &[])
            .await
            .expect("run should return output");
        assert!(!output.success);

        let output = MockRunner::with_stderr("oops")
            .run(Path::new("x"), &[])
            .await
            .expect("run should return output");
        assert_eq!(output.stderr, b"oops");

        let err = MockRunner::unavailable()
            .run(Path::new("x"), &[])
            .await
            .expect_err("run should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
