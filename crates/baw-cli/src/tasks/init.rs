//! Materialize a new project from the tool's templates.

use anyhow::Context;
use baw_core::paths::ToolPaths;
use baw_core::process::{self, CommandLine, ExecSpec};
use baw_core::template::TemplateVars;
use baw_core::{config, io, paths, template, BawError};
use std::path::Path;

pub fn run(target: &Path, short: &str, name: &str, tool: &ToolPaths) -> anyhow::Result<i32> {
    paths::validate_short(short)?;

    if paths::config_path(target).exists() {
        return Err(BawError::ProjectExists(target.to_path_buf()).into());
    }

    io::ensure_dir(target).with_context(|| format!("failed to create {}", target.display()))?;
    io::ensure_dir(&paths::baw_dir(target))?;
    config::create_config(target, short, name)?;
    println!("  created: {}", paths::CONFIG_FILE);

    let vars = TemplateVars::new(target, short, name);
    let renders: &[(&str, &Path, &str)] = &[
        ("setup.py.tmpl", target, "setup.py"),
        ("requirements.txt.tmpl", target, "requirements.txt"),
        ("gitignore.tmpl", target, ".gitignore"),
    ];
    for (tmpl, dir, dest) in renders {
        template::render_file(&tool.templates.join(tmpl), &dir.join(dest), &vars)?;
        println!("  created: {dest}");
    }

    // Source tree, tests skeleton, and documentation config.
    template::render_file(
        &tool.templates.join("package_init.py.tmpl"),
        &target.join(short).join("__init__.py"),
        &vars,
    )?;
    println!("  created: {short}/__init__.py");
    template::render_file(
        &tool.templates.join("test_default.py.tmpl"),
        &target.join(paths::TESTS_DIR).join(format!("test_{short}.py")),
        &vars,
    )?;
    println!("  created: tests/test_{short}.py");
    template::render_file(
        &tool.templates.join("conf.py.tmpl"),
        &target.join("docs").join("conf.py"),
        &vars,
    )?;
    template::render_file(
        &tool.templates.join("index.rst.tmpl"),
        &target.join("docs").join("index.rst"),
        &vars,
    )?;
    println!("  created: docs/");

    // Test-runner config is copied verbatim so the project can also run
    // pytest without the driver.
    template::copy_file(&tool.pytest_config, &target.join("pytest.ini"))?;
    template::copy_file(&tool.coverage_config, &target.join(".coveragerc"))?;
    println!("  created: pytest.ini, .coveragerc");

    let git = process::run(&ExecSpec::new(CommandLine::argv(["git", "init"]), target))?;
    if !git.success() {
        if !git.stderr.is_empty() {
            eprint!("{}", git.stderr);
        }
        return Ok(git.exit_code);
    }
    println!("  created: .git/");

    println!("\nInitialized project '{name}' ({short}) at {}", target.display());
    Ok(0)
}
