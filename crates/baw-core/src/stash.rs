//! Scoped save/restore of the VCS working copy.
//!
//! On entry the working copy (including untracked files) is stashed under a
//! deterministic label; the guard restores it when dropped, on every exit
//! path. If the initial save found nothing to stash, the restore is a no-op.
//! Nested scopes are not supported.

use crate::error::{BawError, Result};
use crate::process::{self, CommandLine, ExecSpec};
use std::path::{Path, PathBuf};

pub const STASH_LABEL: &str = "baw-stash";

pub struct StashScope {
    root: PathBuf,
    stashed: bool,
}

fn git(root: &Path, args: &[&str]) -> Result<process::ExecOutcome> {
    let mut argv = vec!["git".to_string()];
    argv.extend(args.iter().map(|s| s.to_string()));
    process::run(&ExecSpec::new(CommandLine::Argv(argv), root))
}

fn stash_count(root: &Path) -> Result<usize> {
    let out = git(root, &["stash", "list"])?;
    if !out.success() {
        return Err(BawError::Stash(out.stderr.trim().to_string()));
    }
    Ok(out.stdout.lines().count())
}

impl StashScope {
    /// Save the working-copy state. The guard restores it on drop.
    pub fn enter(root: &Path) -> Result<Self> {
        let before = stash_count(root)?;
        let push = git(
            root,
            &["stash", "push", "--include-untracked", "-m", STASH_LABEL],
        )?;
        if !push.success() {
            return Err(BawError::Stash(push.stderr.trim().to_string()));
        }
        // "No local changes to save" exits 0 without creating an entry;
        // compare entry counts rather than parsing the message.
        let stashed = stash_count(root)? > before;
        Ok(Self {
            root: root.to_path_buf(),
            stashed,
        })
    }

    pub fn is_stashed(&self) -> bool {
        self.stashed
    }
}

impl Drop for StashScope {
    fn drop(&mut self) {
        if !self.stashed {
            return;
        }
        match git(&self.root, &["stash", "pop"]) {
            Ok(out) if out.success() => {}
            Ok(out) => tracing::warn!(
                stderr = %out.stderr.trim(),
                "git stash pop failed; working copy left stashed as '{STASH_LABEL}'"
            ),
            Err(e) => tracing::warn!(error = %e, "git stash pop could not run"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_repo() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        for args in [
            vec!["init", "-q"],
            vec!["config", "user.email", "dev@example.com"],
            vec!["config", "user.name", "Dev"],
        ] {
            let out = git(&root, &args).unwrap();
            assert!(out.success(), "git {args:?}: {}", out.stderr);
        }
        std::fs::write(root.join("tracked.txt"), "committed\n").unwrap();
        let out = git(&root, &["add", "."]).unwrap();
        assert!(out.success());
        let out = git(&root, &["commit", "-q", "-m", "initial"]).unwrap();
        assert!(out.success(), "{}", out.stderr);
        (dir, root)
    }

    #[test]
    fn restores_tracked_modification_on_exit() {
        let (_dir, root) = git_repo();
        std::fs::write(root.join("tracked.txt"), "dirty\n").unwrap();

        {
            let scope = StashScope::enter(&root).unwrap();
            assert!(scope.is_stashed());
            // Inside the scope the working copy is clean.
            assert_eq!(
                std::fs::read_to_string(root.join("tracked.txt")).unwrap(),
                "committed\n"
            );
        }

        assert_eq!(
            std::fs::read_to_string(root.join("tracked.txt")).unwrap(),
            "dirty\n"
        );
    }

    #[test]
    fn restores_untracked_file_on_exit() {
        let (_dir, root) = git_repo();
        std::fs::write(root.join("scratch.txt"), "untracked\n").unwrap();

        {
            let scope = StashScope::enter(&root).unwrap();
            assert!(scope.is_stashed());
            assert!(!root.join("scratch.txt").exists());
        }

        assert_eq!(
            std::fs::read_to_string(root.join("scratch.txt")).unwrap(),
            "untracked\n"
        );
    }

    #[test]
    fn restores_on_unwind() {
        let (_dir, root) = git_repo();
        std::fs::write(root.join("tracked.txt"), "dirty\n").unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = StashScope::enter(&root).unwrap();
            panic!("task blew up");
        }));
        assert!(result.is_err());

        assert_eq!(
            std::fs::read_to_string(root.join("tracked.txt")).unwrap(),
            "dirty\n"
        );
    }

    #[test]
    fn clean_tree_is_a_noop() {
        let (_dir, root) = git_repo();
        {
            let scope = StashScope::enter(&root).unwrap();
            assert!(!scope.is_stashed());
        }
        let out = git(&root, &["stash", "list"]).unwrap();
        assert_eq!(out.stdout.trim(), "");
    }
}
