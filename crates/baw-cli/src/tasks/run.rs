use crate::context::ExecutionContext;

/// Run the project's main module.
pub fn run(ctx: &ExecutionContext) -> anyhow::Result<i32> {
    let command = format!("python -m {}", ctx.project.short);
    let out = ctx.dispatch(&command, &ctx.project.root, &[], &[])?;
    if !out.success() && !out.stderr.is_empty() {
        eprint!("{}", out.stderr);
    }
    Ok(out.exit_code)
}
