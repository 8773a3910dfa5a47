use crate::context::ExecutionContext;
use baw_core::{io, paths};

/// Remove the build scratch tree. Idempotent.
pub fn run(ctx: &ExecutionContext) -> anyhow::Result<i32> {
    let build = ctx.project.root.join(paths::BUILD_DIR);
    io::remove_dir_all_idempotent(&build)?;
    println!("Cleaned {}", build.display());
    Ok(0)
}
