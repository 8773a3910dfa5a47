//! The sub-process execution substrate.
//!
//! Every component that spawns a process goes through [`run`], so the
//! environment overlay, verbose streaming, and exit-code normalization
//! behave the same everywhere. Process-creation failure is a distinct
//! error ([`BawError::Spawn`]), never conflated with a non-zero child exit.

use crate::error::{BawError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// Either a shell-interpreted string or an ordered argument vector.
#[derive(Debug, Clone)]
pub enum CommandLine {
    Shell(String),
    Argv(Vec<String>),
}

impl CommandLine {
    pub fn shell(line: impl Into<String>) -> Self {
        CommandLine::Shell(line.into())
    }

    pub fn argv<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::Argv(parts.into_iter().map(Into::into).collect())
    }

    pub fn display(&self) -> String {
        match self {
            CommandLine::Shell(line) => line.clone(),
            CommandLine::Argv(parts) => parts.join(" "),
        }
    }

    fn to_command(&self) -> Result<Command> {
        match self {
            CommandLine::Shell(line) => {
                let (program, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
                let mut cmd = Command::new(program);
                cmd.args([flag, line.as_str()]);
                Ok(cmd)
            }
            CommandLine::Argv(parts) => {
                let program = parts.first().ok_or_else(|| BawError::Spawn {
                    command: String::new(),
                    reason: "empty argument vector".to_string(),
                })?;
                let mut cmd = Command::new(program);
                cmd.args(&parts[1..]);
                Ok(cmd)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ExecSpec / ExecOutcome
// ---------------------------------------------------------------------------

/// One scoped execution: command, working directory, environment overlay,
/// verbose switch, and the exit codes to re-map to success.
#[derive(Debug, Clone)]
pub struct ExecSpec {
    pub command: CommandLine,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
    pub verbose: bool,
    pub skip_error: Vec<i32>,
}

impl ExecSpec {
    pub fn new(command: CommandLine, cwd: &Path) -> Self {
        Self {
            command,
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
            verbose: false,
            skip_error: Vec::new(),
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn envs(mut self, overlay: &[(String, String)]) -> Self {
        self.env.extend(overlay.iter().cloned());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn skip_error(mut self, codes: &[i32]) -> Self {
        self.skip_error.extend_from_slice(codes);
        self
    }
}

#[derive(Debug)]
pub struct ExecOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Execute `spec`, waiting for the child to terminate.
///
/// Verbose mode streams the child's stdio to the user's terminal and returns
/// empty captures; otherwise stdout/stderr are captured into the outcome.
/// A child killed by a signal reports exit code 1.
pub fn run(spec: &ExecSpec) -> Result<ExecOutcome> {
    let mut cmd = spec.command.to_command()?;
    cmd.current_dir(&spec.cwd);
    for (key, value) in &spec.env {
        cmd.env(key, value);
    }

    tracing::debug!(
        command = %spec.command.display(),
        cwd = %spec.cwd.display(),
        "exec"
    );

    let outcome = if spec.verbose {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let status = cmd.status().map_err(|e| spawn_error(&spec.command, e))?;
        ExecOutcome {
            exit_code: status.code().unwrap_or(1),
            stdout: String::new(),
            stderr: String::new(),
        }
    } else {
        cmd.stdin(Stdio::null());
        let output = cmd.output().map_err(|e| spawn_error(&spec.command, e))?;
        ExecOutcome {
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    };

    if outcome.exit_code != 0 && spec.skip_error.contains(&outcome.exit_code) {
        tracing::debug!(code = outcome.exit_code, "exit code remapped to success");
        return Ok(ExecOutcome {
            exit_code: 0,
            ..outcome
        });
    }
    Ok(outcome)
}

fn spawn_error(command: &CommandLine, err: std::io::Error) -> BawError {
    BawError::Spawn {
        command: command.display(),
        reason: err.to_string(),
    }
}
