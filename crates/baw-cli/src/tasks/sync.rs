use crate::context::ExecutionContext;
use baw_core::venv;

/// Provision (or reuse) the isolated environment and install the project's
/// requirements into it. `clean` forces a rebuild; it is set when the clean
/// task is selected in the same invocation.
pub fn run(ctx: &ExecutionContext, clean: bool) -> anyhow::Result<i32> {
    let code = venv::create(&ctx.project.root, clean, ctx.verbose)?;
    if code != 0 {
        return Ok(code);
    }

    let requirements = ctx.project.root.join("requirements.txt");
    if requirements.is_file() {
        let code = venv::install_requirements(&requirements, &ctx.project.root, ctx.verbose)?;
        return Ok(code);
    }
    Ok(0)
}
