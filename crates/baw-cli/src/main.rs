mod cli;
mod context;
mod kernel;
mod tasks;

use anyhow::Context;
use baw_core::paths::{self, ToolPaths};
use baw_core::{config, BawError};
use clap::{CommandFactory, Parser};
use cli::{Cli, TaskSelection};
use context::ExecutionContext;

fn main() {
    let parsed = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let selection = parsed.into_selection();

    if selection.version {
        println!("baw {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if selection.nothing_selected() {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    }

    let code = run(&selection).unwrap_or_else(|e| {
        eprintln!("[ERROR] {e:#}");
        1
    });
    std::process::exit(code);
}

fn run(selection: &TaskSelection) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;

    // init is a standalone entry point: it runs alone, against the current
    // directory, and never consults an existing project.
    if let Some((short, name)) = &selection.init {
        let tool = ToolPaths::discover()?;
        return tasks::init::run(&cwd, short, name, &tool);
    }

    let root = paths::find_root(&cwd).ok_or(BawError::NotInitialized)?;
    let (short, _name) = config::project_name(&paths::config_path(&root))?;
    let tool = ToolPaths::discover()?;
    let ctx = ExecutionContext::new(&root, &short, selection, tool);
    kernel::execute(&ctx, selection)
}
