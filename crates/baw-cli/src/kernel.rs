//! The task kernel: the statically registered task set and the canonical
//! execution order. The order is fixed here, independent of the parser.

use crate::cli::TaskSelection;
use crate::context::ExecutionContext;
use crate::tasks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Clean,
    Sync,
    Build,
    Test,
    Doc,
    Report,
    Run,
    Publish,
    Release,
}

pub const CANONICAL_ORDER: [Task; 9] = [
    Task::Clean,
    Task::Sync,
    Task::Build,
    Task::Test,
    Task::Doc,
    Task::Report,
    Task::Run,
    Task::Publish,
    Task::Release,
];

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Clean => "clean",
            Task::Sync => "sync",
            Task::Build => "build",
            Task::Test => "test",
            Task::Doc => "doc",
            Task::Report => "report",
            Task::Run => "run",
            Task::Publish => "publish",
            Task::Release => "release",
        }
    }

    /// `all` expands to the canonical list except publish and release,
    /// which always require their own flag.
    fn selected(&self, sel: &TaskSelection) -> bool {
        match self {
            Task::Clean => sel.all || sel.clean,
            Task::Sync => sel.all || sel.sync,
            Task::Build => sel.all || sel.build,
            Task::Test => sel.all || sel.test,
            Task::Doc => sel.all || sel.doc,
            Task::Report => sel.all || sel.report,
            Task::Run => sel.all || sel.run,
            Task::Publish => sel.publish,
            Task::Release => sel.release,
        }
    }
}

/// The selected subset, in canonical order.
pub fn execution_list(sel: &TaskSelection) -> Vec<Task> {
    CANONICAL_ORDER
        .iter()
        .copied()
        .filter(|t| t.selected(sel))
        .collect()
}

/// Run the selected tasks in order. The first non-zero exit code stops the
/// kernel and is propagated; errors from the tasks bubble up untouched.
pub fn execute(ctx: &ExecutionContext, sel: &TaskSelection) -> anyhow::Result<i32> {
    for task in execution_list(sel) {
        tracing::debug!(task = task.as_str(), "starting");
        let code = run_task(task, ctx, sel)?;
        if code != 0 {
            tracing::debug!(task = task.as_str(), code, "task failed, stopping");
            return Ok(code);
        }
    }
    Ok(0)
}

fn run_task(task: Task, ctx: &ExecutionContext, sel: &TaskSelection) -> anyhow::Result<i32> {
    match task {
        Task::Clean => tasks::clean::run(ctx),
        Task::Sync => tasks::sync::run(ctx, sel.clean),
        Task::Build => tasks::build::run(ctx),
        Task::Test => tasks::test::run(ctx, &tasks::test::TestOptions::from_modifiers(&sel.test_modifiers)),
        Task::Doc => tasks::doc::run(ctx),
        Task::Report => tasks::report::run(ctx),
        Task::Run => tasks::run::run(ctx),
        Task::Publish => tasks::publish::run(ctx),
        Task::Release => tasks::release::run(ctx),
    }
}
