//! Token substitution for the scaffold templates shipped under the tool root.

use crate::error::{BawError, Result};
use crate::io;
use chrono::Datelike;
use std::path::Path;

/// Version stamped into freshly initialized projects.
pub const INITIAL_VERSION: &str = "0.1.0";

/// Values substituted for `{{ROOT}}`, `{{NAME}}`, `{{SHORT}}`, `{{VERSION}}`,
/// and `{{YEAR}}` in template contents.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    pub root: String,
    pub name: String,
    pub short: String,
    pub version: String,
    pub year: String,
}

impl TemplateVars {
    pub fn new(root: &Path, short: &str, name: &str) -> Self {
        Self {
            root: root.display().to_string(),
            name: name.to_string(),
            short: short.to_string(),
            version: INITIAL_VERSION.to_string(),
            year: chrono::Utc::now().year().to_string(),
        }
    }
}

pub fn render(content: &str, vars: &TemplateVars) -> String {
    content
        .replace("{{ROOT}}", &vars.root)
        .replace("{{NAME}}", &vars.name)
        .replace("{{SHORT}}", &vars.short)
        .replace("{{VERSION}}", &vars.version)
        .replace("{{YEAR}}", &vars.year)
}

/// Render the template at `src` into `dest`, creating parent directories.
pub fn render_file(src: &Path, dest: &Path, vars: &TemplateVars) -> Result<()> {
    let content = read_template(src)?;
    io::atomic_write(dest, render(&content, vars).as_bytes())
}

/// Copy a non-templated tool file (e.g. pytest.ini) into the project.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    let content = read_template(src)?;
    io::atomic_write(dest, content.as_bytes())
}

fn read_template(src: &Path) -> Result<String> {
    if !src.is_file() {
        return Err(BawError::TemplateMissing(src.to_path_buf()));
    }
    Ok(std::fs::read_to_string(src)?)
}
