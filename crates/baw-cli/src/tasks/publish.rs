use crate::context::ExecutionContext;

/// Upload the built distribution. Requires a prior build.
pub fn run(ctx: &ExecutionContext) -> anyhow::Result<i32> {
    let out = ctx.dispatch(
        "python -m twine upload build/dist/*",
        &ctx.project.root,
        &[],
        &[],
    )?;
    if !out.success() && !out.stderr.is_empty() {
        eprint!("{}", out.stderr);
    }
    Ok(out.exit_code)
}
