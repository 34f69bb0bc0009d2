//! Running external tools (git, sf)

use std::process::{Command, ExitStatus};

use tracing::{debug, trace};

use crate::error::{DefuseError, DefuseResult};

/// Output of a finished child process
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Most useful text for an error report: stderr, else stdout, trimmed
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        self.stdout.trim().to_string()
    }
}

/// Render `cmd` for logs
pub fn command_line(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Run `cmd` to completion, capturing its output.
///
/// Only a failure to launch is an error; a non-zero exit is returned to the
/// caller, which knows what it means.
pub fn run_captured(cmd: &mut Command) -> DefuseResult<Captured> {
    let line = command_line(cmd);
    debug!(command = %line, "running");

    let output = cmd.output().map_err(|e| DefuseError::Tool {
        program: cmd.get_program().to_string_lossy().into_owned(),
        message: e.to_string(),
    })?;

    let captured = Captured {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    trace!(command = %line, status = ?captured.code(), stdout = %captured.stdout, stderr = %captured.stderr, "finished");
    Ok(captured)
}
