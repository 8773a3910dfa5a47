//! Compose and execute the test-runner invocation.
//!
//! The coverage command line is assembled from configuration (fail-under,
//! source set) and runtime flags, never hard-coded, so the coverage floor
//! is tunable per project.

use crate::cli::TestModifier;
use crate::context::ExecutionContext;
use baw_core::paths::{ProjectPaths, ToolPaths};
use baw_core::stash::StashScope;
use baw_core::{config, io, paths, BawError};
use std::collections::BTreeSet;

/// pytest's "no tests were collected" exit code, remapped to success.
pub const NO_TESTS_COLLECTED: i32 = 5;

#[derive(Debug, Default)]
pub struct TestOptions {
    pub coverage: bool,
    pub fast: bool,
    pub longrun: bool,
    pub pdb: bool,
    pub stash: bool,
}

impl TestOptions {
    pub fn from_modifiers(modifiers: &BTreeSet<TestModifier>) -> Self {
        Self {
            coverage: true,
            fast: modifiers.contains(&TestModifier::Fast),
            longrun: modifiers.contains(&TestModifier::Longrun),
            pdb: modifiers.contains(&TestModifier::Pdb),
            stash: modifiers.contains(&TestModifier::Stash),
        }
    }
}

pub fn run(ctx: &ExecutionContext, opts: &TestOptions) -> anyhow::Result<i32> {
    let project = &ctx.project;
    if !project.tests.is_dir() {
        return Err(BawError::NoTestDirectory(project.tests.clone()).into());
    }
    io::ensure_dir(&project.tmp)?;

    // LONGRUN/FAST are independent switches interpreted by the test code;
    // the driver only sets them in the child's environment.
    let mut env: Vec<(String, String)> = Vec::new();
    if opts.longrun {
        env.push(("LONGRUN".to_string(), "True".to_string()));
    }
    if opts.fast {
        env.push(("FAST".to_string(), "True".to_string()));
    }

    let config_path = paths::config_path(&project.root);
    let policy = CoveragePolicy {
        minimal_coverage: config::minimal_coverage(&config_path)?,
        sources: config::sources(&config_path)?,
    };

    let command = shell_line(&compose_pytest_args(project, &ctx.tool, opts, &policy));

    let outcome = if opts.stash {
        let _scope = StashScope::enter(&project.root)?;
        ctx.dispatch(&command, &project.root, &env, &[NO_TESTS_COLLECTED])?
    } else {
        ctx.dispatch(&command, &project.root, &env, &[NO_TESTS_COLLECTED])?
    };

    if !outcome.success() && !outcome.stderr.is_empty() {
        eprint!("{}", outcome.stderr);
    }
    Ok(outcome.exit_code)
}

#[derive(Debug)]
pub struct CoveragePolicy {
    pub minimal_coverage: u32,
    pub sources: Vec<String>,
}

/// The full pytest argument vector for one invocation.
pub fn compose_pytest_args(
    project: &ProjectPaths,
    tool: &ToolPaths,
    opts: &TestOptions,
    policy: &CoveragePolicy,
) -> Vec<String> {
    let mut args = vec![
        "pytest".to_string(),
        "-c".to_string(),
        tool.pytest_config.display().to_string(),
    ];
    if opts.pdb {
        args.push("--pdb".to_string());
    }
    if opts.coverage {
        args.push(format!("--cov-config={}", tool.coverage_config.display()));
        for source in &policy.sources {
            args.push(format!("--cov={source}"));
        }
        args.push(format!("--cov-report=html:{}", project.report.display()));
        args.push("--cov-branch".to_string());
        args.push(format!("--cov-fail-under={}", policy.minimal_coverage));
        if opts.pdb {
            // Debugger and coverage instrumentation interfere.
            args.push("--no-cov".to_string());
        }
    }
    args.push(format!("--log-file={}", project.tests_log().display()));
    args.push(project.tests.display().to_string());
    args
}

/// Join an argument vector into a shell line, quoting where needed. The
/// dispatch path takes a shell string so virtual-env activation can be
/// prefixed onto it.
fn shell_line(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_quote(a))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:".contains(c));
    if safe && !arg.is_empty() {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixtures() -> (ProjectPaths, ToolPaths) {
        (
            ProjectPaths::new(Path::new("/proj"), "xcd"),
            ToolPaths::from_root(Path::new("/opt/baw")),
        )
    }

    fn coverage_opts() -> TestOptions {
        TestOptions {
            coverage: true,
            ..Default::default()
        }
    }

    fn policy(minimal: u32, extras: &[&str]) -> CoveragePolicy {
        let mut sources = vec!["xcd".to_string()];
        sources.extend(extras.iter().map(|s| s.to_string()));
        CoveragePolicy {
            minimal_coverage: minimal,
            sources,
        }
    }

    #[test]
    fn composes_coverage_arguments_from_policy() {
        let (project, tool) = fixtures();
        let args = compose_pytest_args(&project, &tool, &coverage_opts(), &policy(50, &["abc", "defg"]));

        assert_eq!(args[0], "pytest");
        assert_eq!(args[1], "-c");
        assert_eq!(args[2], "/opt/baw/templates/pytest.ini");
        assert!(args.contains(&"--cov-config=/opt/baw/templates/.coveragerc".to_string()));
        assert!(args.contains(&"--cov=xcd".to_string()));
        assert!(args.contains(&"--cov=abc".to_string()));
        assert!(args.contains(&"--cov=defg".to_string()));
        assert!(args.contains(&"--cov-report=html:/proj/build/tmp/report".to_string()));
        assert!(args.contains(&"--cov-branch".to_string()));
        assert!(args.contains(&"--cov-fail-under=50".to_string()));
        assert!(!args.contains(&"--no-cov".to_string()));
    }

    #[test]
    fn sources_drive_cov_entries_in_order() {
        let (project, tool) = fixtures();
        let args = compose_pytest_args(&project, &tool, &coverage_opts(), &policy(0, &["a", "b"]));
        let covs: Vec<&String> = args.iter().filter(|a| a.starts_with("--cov=")).collect();
        assert_eq!(covs, ["--cov=xcd", "--cov=a", "--cov=b"]);
    }

    #[test]
    fn pdb_with_coverage_adds_no_cov() {
        let (project, tool) = fixtures();
        let opts = TestOptions {
            coverage: true,
            pdb: true,
            ..Default::default()
        };
        let args = compose_pytest_args(&project, &tool, &opts, &policy(0, &[]));
        assert!(args.contains(&"--pdb".to_string()));
        assert!(args.contains(&"--cov=xcd".to_string()));
        assert!(args.contains(&"--no-cov".to_string()));
    }

    #[test]
    fn log_file_and_target_close_the_command() {
        let (project, tool) = fixtures();
        let args = compose_pytest_args(&project, &tool, &coverage_opts(), &policy(0, &[]));
        let n = args.len();
        assert_eq!(args[n - 2], "--log-file=/proj/build/tmp/tests.log");
        assert_eq!(args[n - 1], "/proj/tests");
    }

    #[test]
    fn no_coverage_flags_without_coverage() {
        let (project, tool) = fixtures();
        let opts = TestOptions::default();
        let args = compose_pytest_args(&project, &tool, &opts, &policy(80, &["a"]));
        assert!(!args.iter().any(|a| a.starts_with("--cov")));
    }

    #[test]
    fn modifiers_map_onto_options() {
        let mods: BTreeSet<TestModifier> =
            [TestModifier::Stash, TestModifier::Longrun].into_iter().collect();
        let opts = TestOptions::from_modifiers(&mods);
        assert!(opts.coverage);
        assert!(opts.stash);
        assert!(opts.longrun);
        assert!(!opts.fast);
        assert!(!opts.pdb);
    }

    #[test]
    fn shell_line_quotes_spaced_arguments() {
        let line = shell_line(&["pytest".to_string(), "/a b/tests".to_string()]);
        assert_eq!(line, "pytest '/a b/tests'");
    }
}
