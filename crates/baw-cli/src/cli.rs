//! Flag grammar and the parsed `TaskSelection` record.
//!
//! The surface is flag-based rather than subcommand-based because a single
//! invocation selects any subset of tasks (`baw -c -s -t`). `--test` may be
//! repeated, each occurrence optionally carrying one modifier; modifiers
//! accumulate into a set.

use clap::{ArgAction, Parser, ValueEnum};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum TestModifier {
    /// Stash the working copy around the test run
    Stash,
    /// Set LONGRUN=True in the test environment
    Longrun,
    /// Set FAST=True in the test environment
    Fast,
    /// Drop into the debugger on failure (disables the coverage report)
    Pdb,
}

#[derive(Parser, Debug)]
#[command(
    name = "baw",
    about = "Project automation driver — standardizes init, sync, test, doc, build and release",
    disable_version_flag = true
)]
pub struct Cli {
    /// Run the canonical task set (everything except publish and release)
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Build a source distribution
    #[arg(short = 'b', long)]
    pub build: bool,

    /// Remove the build scratch tree
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Generate documentation
    #[arg(short = 'd', long)]
    pub doc: bool,

    /// Execute selected tasks inside a container
    #[arg(long)]
    pub docker: bool,

    /// Initialize a new project in the current directory
    #[arg(short = 'i', long, num_args = 2, value_names = ["SHORT", "NAME"])]
    pub init: Option<Vec<String>>,

    /// Upload the built distribution
    #[arg(short = 'p', long)]
    pub publish: bool,

    /// Package a release
    #[arg(short = 'r', long)]
    pub release: bool,

    /// Show where the coverage report lives
    #[arg(long)]
    pub report: bool,

    /// Run the project
    #[arg(long)]
    pub run: bool,

    /// Synchronize dependencies into the isolated environment
    #[arg(short = 's', long)]
    pub sync: bool,

    /// Run the test suite; repeatable, each occurrence may carry a modifier
    #[arg(
        short = 't',
        long,
        value_name = "MODIFIER",
        value_enum,
        num_args = 0..=1,
        action = ArgAction::Append
    )]
    pub test: Option<Vec<TestModifier>>,

    /// Execute selected tasks inside the isolated environment
    #[arg(long = "virtual")]
    pub virtual_env: bool,

    /// Print the version and exit
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Stream subprocess output instead of capturing it
    #[arg(long)]
    pub verbose: bool,
}

/// The parsed CLI state handed to the kernel: selected tasks, option
/// payloads, and the mode switches.
#[derive(Debug, Default)]
pub struct TaskSelection {
    pub all: bool,
    pub build: bool,
    pub clean: bool,
    pub doc: bool,
    pub publish: bool,
    pub release: bool,
    pub report: bool,
    pub run: bool,
    pub sync: bool,
    pub test: bool,
    pub test_modifiers: BTreeSet<TestModifier>,
    pub init: Option<(String, String)>,
    pub docker: bool,
    pub virtual_env: bool,
    pub version: bool,
    pub verbose: bool,
}

impl Cli {
    pub fn into_selection(self) -> TaskSelection {
        let (test, test_modifiers) = match self.test {
            Some(modifiers) => (true, modifiers.into_iter().collect()),
            None => (false, BTreeSet::new()),
        };
        let init = self.init.map(|mut pair| {
            // clap guarantees exactly two values
            let name = pair.pop().unwrap_or_default();
            let short = pair.pop().unwrap_or_default();
            (short, name)
        });
        TaskSelection {
            all: self.all,
            build: self.build,
            clean: self.clean,
            doc: self.doc,
            publish: self.publish,
            release: self.release,
            report: self.report,
            run: self.run,
            sync: self.sync,
            test,
            test_modifiers,
            init,
            docker: self.docker,
            virtual_env: self.virtual_env,
            version: self.version,
            verbose: self.verbose,
        }
    }
}

impl TaskSelection {
    /// True when the invocation names no task, no init, and no version —
    /// the usage-and-exit-1 case.
    pub fn nothing_selected(&self) -> bool {
        !(self.all
            || self.build
            || self.clean
            || self.doc
            || self.publish
            || self.release
            || self.report
            || self.run
            || self.sync
            || self.test
            || self.version
            || self.init.is_some())
    }
}
