//! Per-invocation execution context, constructed once and read-only after.

use crate::cli::TaskSelection;
use baw_core::paths::{ProjectPaths, ToolPaths};
use baw_core::process::{self, CommandLine, ExecOutcome, ExecSpec};
use baw_core::{venv, Result};
use std::path::Path;

pub struct ExecutionContext {
    pub project: ProjectPaths,
    pub tool: ToolPaths,
    pub environment_overlay: Vec<(String, String)>,
    pub verbose: bool,
    pub virtual_active: bool,
    pub docker: bool,
}

impl ExecutionContext {
    pub fn new(root: &Path, short: &str, selection: &TaskSelection, tool: ToolPaths) -> Self {
        Self {
            project: ProjectPaths::new(root, short),
            tool,
            environment_overlay: Vec::new(),
            verbose: selection.verbose,
            virtual_active: selection.virtual_env,
            docker: selection.docker,
        }
    }

    /// Dispatch a shell command through the process runner, honoring the
    /// virtual/docker switches. All tasks issue their commands here so the
    /// switches apply uniformly.
    pub fn dispatch(
        &self,
        command: &str,
        cwd: &Path,
        env: &[(String, String)],
        skip_error: &[i32],
    ) -> Result<ExecOutcome> {
        let mut merged = self.environment_overlay.clone();
        merged.extend(env.iter().cloned());

        if self.virtual_active {
            return venv::run_in(
                &self.project.root,
                command,
                cwd,
                &merged,
                self.verbose,
                skip_error,
            );
        }

        let line = if self.docker {
            format!(
                "docker run --rm -v {}:/project -w /project {}:latest sh -c '{}'",
                self.project.root.display(),
                self.project.short,
                command
            )
        } else {
            command.to_string()
        };
        let spec = ExecSpec::new(CommandLine::shell(line), cwd)
            .envs(&merged)
            .verbose(self.verbose)
            .skip_error(skip_error);
        process::run(&spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx(dir: &TempDir) -> ExecutionContext {
        ExecutionContext {
            project: ProjectPaths::new(dir.path(), "xcd"),
            tool: ToolPaths::from_root(dir.path()),
            environment_overlay: Vec::new(),
            verbose: false,
            virtual_active: false,
            docker: false,
        }
    }

    #[test]
    fn dispatch_runs_plain_command() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx(&dir);
        let out = ctx.dispatch("echo plain", dir.path(), &[], &[]).unwrap();
        assert_eq!(out.stdout.trim(), "plain");
    }

    #[test]
    fn dispatch_merges_env_overlay() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx(&dir);
        ctx.environment_overlay
            .push(("BASE".to_string(), "1".to_string()));
        let out = ctx
            .dispatch(
                "echo $BASE$EXTRA",
                dir.path(),
                &[("EXTRA".to_string(), "2".to_string())],
                &[],
            )
            .unwrap();
        assert_eq!(out.stdout.trim(), "12");
    }

    #[test]
    fn dispatch_honors_skip_error() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx(&dir);
        let out = ctx.dispatch("exit 5", dir.path(), &[], &[5]).unwrap();
        assert_eq!(out.exit_code, 0);
    }
}
