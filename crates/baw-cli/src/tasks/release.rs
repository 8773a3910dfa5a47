use crate::context::ExecutionContext;

/// Package a release: a source distribution under `build/release/` plus a
/// moving release tag.
pub fn run(ctx: &ExecutionContext) -> anyhow::Result<i32> {
    let out = ctx.dispatch(
        "python setup.py sdist --dist-dir build/release",
        &ctx.project.root,
        &[],
        &[],
    )?;
    if !out.success() {
        if !out.stderr.is_empty() {
            eprint!("{}", out.stderr);
        }
        return Ok(out.exit_code);
    }

    let tag = ctx.dispatch("git tag -f baw-release", &ctx.project.root, &[], &[])?;
    if !tag.success() && !tag.stderr.is_empty() {
        eprint!("{}", tag.stderr);
    }
    Ok(tag.exit_code)
}
