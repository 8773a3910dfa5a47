//! The project-local isolated execution environment under `<root>/virtual/`.
//!
//! Lifecycle: Absent → Present-Empty → Provisioned. Provisioning dominates
//! wall-clock time, so a non-empty directory is reused as-is; only
//! `clean=true` forces a rebuild.

use crate::error::{BawError, Result};
use crate::process::{self, CommandLine, ExecOutcome, ExecSpec};
use crate::{io, paths};
use std::path::{Path, PathBuf};

/// Recursively delete the environment. Absent is a success; safe against
/// partially provisioned trees.
pub fn destroy(path: &Path) -> Result<()> {
    io::remove_dir_all_idempotent(path)
}

fn virtual_dir(root: &Path) -> PathBuf {
    root.join(paths::VIRTUAL_DIR)
}

fn find_python() -> Result<PathBuf> {
    which::which("python3")
        .or_else(|_| which::which("python"))
        .map_err(|_| BawError::PythonNotFound)
}

/// Provision (or reuse) the environment. Returns 0 on success, 1 on
/// provisioner failure with the provisioner's output surfaced.
pub fn create(root: &Path, clean: bool, verbose: bool) -> Result<i32> {
    let venv = virtual_dir(root);
    if clean {
        destroy(&venv)?;
    }
    io::ensure_dir(&venv)?;
    if io::dir_is_nonempty(&venv) {
        println!("Using virtual environment");
        return Ok(0);
    }

    let python = find_python()?;
    let spec = ExecSpec::new(
        CommandLine::argv([
            python.display().to_string(),
            "-m".to_string(),
            "venv".to_string(),
            venv.display().to_string(),
        ]),
        root,
    )
    .verbose(verbose);
    let outcome = process::run(&spec)?;
    if !outcome.success() {
        if !outcome.stdout.is_empty() {
            print!("{}", outcome.stdout);
        }
        if !outcome.stderr.is_empty() {
            eprint!("{}", outcome.stderr);
        }
        return Ok(1);
    }
    Ok(0)
}

/// The shell line that activates the environment and then runs `command`.
pub fn activation_command(root: &Path, command: &str) -> CommandLine {
    let venv = virtual_dir(root);
    let line = if cfg!(windows) {
        format!(
            "\"{}\" && {}",
            venv.join("Scripts").join("activate.bat").display(),
            command
        )
    } else {
        format!(". {}/bin/activate && {}", venv.display(), command)
    };
    CommandLine::shell(line)
}

/// Execute `command` with the environment activated, dispatched through the
/// process runner.
pub fn run_in(
    root: &Path,
    command: &str,
    cwd: &Path,
    env: &[(String, String)],
    verbose: bool,
    skip_error: &[i32],
) -> Result<ExecOutcome> {
    let spec = ExecSpec::new(activation_command(root, command), cwd)
        .envs(env)
        .verbose(verbose)
        .skip_error(skip_error);
    process::run(&spec)
}

/// Run the package installer inside the environment against a requirements
/// descriptor. Returns the installer's exit code.
pub fn install_requirements(requirements: &Path, root: &Path, verbose: bool) -> Result<i32> {
    let command = format!("pip install -r {}", requirements.display());
    let outcome = run_in(root, &command, root, &[], verbose, &[])?;
    if !outcome.success() && !outcome.stderr.is_empty() {
        eprint!("{}", outcome.stderr);
    }
    Ok(outcome.exit_code)
}
