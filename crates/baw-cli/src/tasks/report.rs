use crate::context::ExecutionContext;

/// Surface the coverage report location. Informational: a project that has
/// not run tests yet still completes `--all` without failing here.
pub fn run(ctx: &ExecutionContext) -> anyhow::Result<i32> {
    let index = ctx.project.report.join("index.html");
    if index.is_file() {
        println!("Coverage report: {}", index.display());
    } else {
        println!("No coverage report yet (run 'baw --test' first)");
    }
    Ok(0)
}
