use crate::config::FACELETS_PLACEHOLDER;
use crate::domain::model::FaceletString;
use crate::domain::ports::{SolveOutcome, Solver};
use crate::utils::error::{CubeError, Result};
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs an external solver program once per cube.
///
/// The facelet string replaces `{facelets}` in the arguments; when no
/// argument carries the placeholder it is written to stdin instead. The
/// program's stdout is the solution. Output starting with `Error` means the
/// cube has no solution, and a non-zero exit code means the program rejected
/// its input. A program killed by a signal is a solver failure.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessSolver {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn takes_argument(&self) -> bool {
        self.args.iter().any(|arg| arg.contains(FACELETS_PLACEHOLDER))
    }

    async fn run(&self, facelets: &FaceletString) -> Result<Output> {
        let takes_argument = self.takes_argument();

        let mut command = Command::new(&self.command);
        command
            .args(
                self.args
                    .iter()
                    .map(|arg| arg.replace(FACELETS_PLACEHOLDER, facelets.as_str())),
            )
            .stdin(if takes_argument {
                Stdio::null()
            } else {
                Stdio::piped()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| CubeError::SolverError {
            message: format!("failed to start '{}': {}", self.command, e),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            let line = format!("{}\n", facelets);
            match stdin.write_all(line.as_bytes()).await {
                // The program may answer without reading its input.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let output = child.wait_with_output();
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| CubeError::SolverError {
                    message: format!("'{}' did not finish within {:?}", self.command, limit),
                })?
                .map_err(CubeError::from),
            None => output.await.map_err(CubeError::from),
        }
    }
}

fn interpret(output: &Output) -> Result<SolveOutcome> {
    let stdout = String::from_utf8_lossy(&output.stdout);

    if output.status.code().is_none() {
        return Err(CubeError::SolverError {
            message: format!("solver terminated by {}", output.status),
        });
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Interpreters print a traceback; its last line names the problem.
        let details = stderr
            .lines()
            .chain(stdout.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| format!("solver exited with {}", output.status));
        return Ok(SolveOutcome::InvalidInput(details));
    }

    Ok(super::outcome_from_text(&stdout))
}

#[async_trait]
impl Solver for ProcessSolver {
    async fn solve(&self, facelets: &FaceletString) -> Result<SolveOutcome> {
        tracing::debug!(command = %self.command, "Running solver process");
        let output = self.run(facelets).await?;
        tracing::debug!(status = %output.status, "Solver process exited");
        interpret(&output)
    }
}
