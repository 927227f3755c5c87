//! Still capture through the external `raspistill` binary.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::error::CaptureError;
use crate::options::CaptureOptions;

/// Default name of the still capture binary.
pub const DEFAULT_PROGRAM: &str = "raspistill";

/// Outcome of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Whether the process exited successfully.
    pub success: bool,
    /// Everything the process wrote to its error stream.
    pub stderr: Vec<u8>,
}

/// Abstraction over running an external program to completion.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to exit.
    async fn run(&self, program: &Path, args: &[OsString]) -> std::io::Result<ProcessOutput>;
}

/// Runs programs as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[OsString]) -> std::io::Result<ProcessOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(ProcessOutput {
            success: output.status.success(),
            stderr: output.stderr,
        })
    }
}

/// Still camera driven by the `raspistill` binary.
#[derive(Debug, Clone)]
pub struct Raspistill<R = SystemRunner> {
    program: PathBuf,
    output_dir: Option<PathBuf>,
    runner: R,
}

impl Default for Raspistill {
    fn default() -> Self {
        Self::new()
    }
}

impl Raspistill {
    /// Camera using `raspistill` from `PATH`, writing to the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl<R: ProcessRunner> Raspistill<R> {
    /// Camera using a custom process runner.
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            output_dir: None,
            runner,
        }
    }

    /// Use a different capture binary.
    #[must_use]
    pub fn with_program<P: Into<PathBuf>>(mut self, program: P) -> Self {
        self.program = program.into();
        self
    }

    /// Write pictures into `dir` instead of the current directory.
    #[must_use]
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// The capture binary in use.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Path the picture for `file_name` is written to.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        let file = format!("{file_name}.jpg");
        match &self.output_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        }
    }

    /// Take a picture named `<file_name>.jpg`.
    ///
    /// Resolves to the path of the picture once the binary has exited cleanly
    /// without writing diagnostics.
    pub async fn capture(&self, file_name: &str) -> Result<PathBuf, CaptureError> {
        self.run(file_name, Vec::new()).await
    }

    /// Take a picture with additional, already validated options.
    pub async fn capture_with(
        &self,
        file_name: &str,
        options: &CaptureOptions,
    ) -> Result<PathBuf, CaptureError> {
        let args = options.to_args()?;
        self.run(file_name, args).await
    }

    async fn run(&self, file_name: &str, mut args: Vec<OsString>) -> Result<PathBuf, CaptureError> {
        let output_path = self.output_path(file_name);
        args.push(OsString::from("-o"));
        args.push(output_path.clone().into_os_string());

        log::debug!("running {} {args:?}", self.program.display());

        let output = match self.runner.run(&self.program, &args).await {
            Ok(output) => output,
            Err(err) => {
                log::warn!("failed to start {}: {err}", self.program.display());
                return Err(CaptureError::CaptureFailed);
            }
        };

        if !output.success || !output.stderr.is_empty() {
            log::warn!(
                "{} failed (success: {}): {}",
                self.program.display(),
                output.success,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(CaptureError::CaptureFailed);
        }

        log::info!("captured {}", output_path.display());
        Ok(output_path)
    }
}

/// Take a picture named `<file_name>.jpg` in the current directory with the
/// default binary.
pub async fn take_picture(file_name: &str) -> Result<PathBuf, CaptureError> {
    Raspistill::new().capture(file_name).await
}
