use crate::context::ExecutionContext;

/// Build a source distribution into `build/dist/`.
pub fn run(ctx: &ExecutionContext) -> anyhow::Result<i32> {
    let out = ctx.dispatch(
        "python setup.py sdist --dist-dir build/dist",
        &ctx.project.root,
        &[],
        &[],
    )?;
    if !out.success() && !out.stderr.is_empty() {
        eprint!("{}", out.stderr);
    }
    Ok(out.exit_code)
}
