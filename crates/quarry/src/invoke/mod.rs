//! Subprocess invocation of the external parsing tool.
//!
//! [`ProcessInvoker`] implements the [`ToolInvoker`] trait by spawning the
//! tool as `<binary> parse <file> --json-symbols` with stdin closed, capturing
//! stdout and stderr until both streams reach end-of-file, and waiting for
//! the process to exit. Exactly one subprocess is spawned per call; nothing
//! is written to the filesystem and nothing is cached.
//!
//! Stdout and stderr are captured separately. Callers that need the merged
//! diagnostic text the tool's original consumers saw use
//! [`ToolOutput::combined`], which concatenates stdout followed by stderr.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::QuarryError;

/// Tracing target for invocation operations.
const INVOKE_TARGET: &str = "quarry::invoke";

/// Interval between exit-status polls while a deadline is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of one tool invocation: exit code and both output
/// streams.
///
/// # Example
///
/// ```
/// use quarry::invoke::ToolOutput;
///
/// let output = ToolOutput::new(Some(0), "{\"files\": []}", "");
/// assert!(output.success());
/// assert_eq!(output.combined(), "{\"files\": []}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl ToolOutput {
    /// Creates a captured output record.
    ///
    /// A `code` of `None` means the process was terminated by a signal
    /// rather than exiting.
    #[must_use]
    pub fn new(code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns `true` when the tool exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns the exit code, or `None` for signal termination.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// Returns the captured standard output.
    #[must_use]
    pub const fn stdout(&self) -> &str {
        self.stdout.as_str()
    }

    /// Returns the captured standard error.
    #[must_use]
    pub const fn stderr(&self) -> &str {
        self.stderr.as_str()
    }

    /// Returns stdout followed by stderr as one diagnostic text.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Trait abstracting tool invocation for testability.
///
/// The production implementation is [`ProcessInvoker`], which spawns a real
/// subprocess. Test code implements this trait to inject pre-configured
/// captured outputs without spawning processes.
pub trait ToolInvoker {
    /// Runs `<binary> parse <file> --json-symbols` and captures its output
    /// and exit status.
    ///
    /// # Errors
    ///
    /// Returns a [`QuarryError`] if the process cannot be started, a stream
    /// cannot be read, the wait is interrupted, or a configured deadline
    /// passes. A non-zero exit is not an error at this layer; it is reported
    /// through [`ToolOutput::code`] for the caller to classify.
    fn invoke(&self, binary: &Path, file: &Path) -> Result<ToolOutput, QuarryError>;
}

/// Invoker that spawns the external tool as a child process.
///
/// By default the wait for exit has no deadline, matching the trust that the
/// tool terminates. [`ProcessInvoker::with_timeout`] arms a deadline after
/// which the child is killed and the invocation fails with
/// [`QuarryError::Timeout`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker {
    timeout: Option<Duration>,
}

impl ProcessInvoker {
    /// Creates an invoker with no deadline.
    #[must_use]
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    /// Creates an invoker that kills the tool after `timeout`.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

impl ToolInvoker for ProcessInvoker {
    fn invoke(&self, binary: &Path, file: &Path) -> Result<ToolOutput, QuarryError> {
        let start = Instant::now();

        debug!(
            target: INVOKE_TARGET,
            binary = %binary.display(),
            file = %file.display(),
            "spawning external tool"
        );

        let mut child = Command::new(binary)
            .arg("parse")
            .arg(file)
            .arg("--json-symbols")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| {
                io_failure(
                    format!("failed to start '{}'", binary.display()),
                    source,
                )
            })?;

        // Both streams are drained on their own threads so a child that
        // fills one pipe while the other is being read cannot deadlock, and
        // so the exit wait below stays responsive to the deadline.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let wait_result = self.wait_for_exit(&mut child, start);
        let stdout = join_reader(stdout_reader)?;
        let stderr = join_reader(stderr_reader)?;
        let code = wait_result?;

        debug!(
            target: INVOKE_TARGET,
            binary = %binary.display(),
            file = %file.display(),
            ?code,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "external tool exited"
        );

        Ok(ToolOutput::new(code, stdout, stderr))
    }
}

impl ProcessInvoker {
    /// Waits for the child to exit, enforcing the deadline when one is
    /// armed. On deadline expiry the child is killed and reaped before the
    /// error is returned, so the reader threads always reach end-of-file.
    fn wait_for_exit(&self, child: &mut Child, start: Instant) -> Result<Option<i32>, QuarryError> {
        let Some(timeout) = self.timeout else {
            let status = child
                .wait()
                .map_err(|source| io_failure("failed to wait for the external tool", source))?;
            return Ok(status.code());
        };

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status.code()),
                Ok(None) => {
                    if start.elapsed() > timeout {
                        warn!(
                            target: INVOKE_TARGET,
                            timeout_secs = timeout.as_secs(),
                            "external tool timed out, killing process"
                        );
                        drop(child.kill());
                        drop(child.wait());
                        return Err(QuarryError::Timeout {
                            timeout_secs: timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(io_failure("failed to wait for the external tool", source));
                }
            }
        }
    }
}

/// Spawns a thread that drains one output stream to a byte buffer.
fn spawn_reader<R>(stream: Option<R>) -> Option<JoinHandle<std::io::Result<Vec<u8>>>>
where
    R: Read + Send + 'static,
{
    stream.map(|mut reader| {
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            reader.read_to_end(&mut buffer)?;
            Ok(buffer)
        })
    })
}

/// Joins a reader thread and converts its bytes to text, lossily.
fn join_reader(handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> Result<String, QuarryError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| QuarryError::ToolFailed {
            message: String::from("output reader thread panicked"),
            source: None,
        })?
        .map_err(|source| io_failure("failed to read external tool output", source))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Classifies an I/O failure: an interrupted wait or read surfaces as
/// [`QuarryError::Interrupted`], anything else as [`QuarryError::ToolFailed`]
/// carrying the source.
fn io_failure(message: impl Into<String>, source: std::io::Error) -> QuarryError {
    if source.kind() == std::io::ErrorKind::Interrupted {
        return QuarryError::Interrupted;
    }
    QuarryError::ToolFailed {
        message: message.into(),
        source: Some(Arc::new(source)),
    }
}
