use crate::context::ExecutionContext;

/// Generate documentation from `docs/` into the scratch tree.
pub fn run(ctx: &ExecutionContext) -> anyhow::Result<i32> {
    let target = ctx.project.tmp.join("doc");
    let command = format!(
        "sphinx-build docs {}",
        target.display()
    );
    let out = ctx.dispatch(&command, &ctx.project.root, &[], &[])?;
    if !out.success() && !out.stderr.is_empty() {
        eprint!("{}", out.stderr);
    }
    Ok(out.exit_code)
}
