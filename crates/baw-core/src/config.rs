//! The `.baw/project.config` store.
//!
//! INI format with a required `[project]` section (`short`, `name`) and an
//! optional `[tests]` section (`minimal_coverage`, `source`). `source` is a
//! whitespace-separated list and may continue across indented lines, as in
//! Python's configparser dialect. Files are UTF-8.

use crate::error::{BawError, Result};
use crate::{io, paths};
use configparser::ini::{Ini, IniDefault};
use std::path::Path;

fn parser() -> Ini {
    let mut defaults = IniDefault::default();
    defaults.multiline = true;
    Ini::new_from_defaults(defaults)
}

/// Parse the config file at `path`. Fails if the file is missing or malformed.
pub fn load(path: &Path) -> Result<Ini> {
    if !path.is_file() {
        return Err(BawError::NotInitialized);
    }
    let mut ini = parser();
    ini.load(path).map_err(|reason| BawError::Config {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(ini)
}

/// The `(short, name)` identity pair. Fails if either field is absent.
pub fn project_name(path: &Path) -> Result<(String, String)> {
    let ini = load(path)?;
    match (ini.get("project", "short"), ini.get("project", "name")) {
        (Some(short), Some(name)) => Ok((short, name)),
        _ => Err(BawError::IncompleteProject(path.to_path_buf())),
    }
}

/// Coverage targets: the primary source directory (named after the short)
/// first, then any `tests.source` entries in file order. Order drives the
/// coverage command line.
pub fn sources(path: &Path) -> Result<Vec<String>> {
    let ini = load(path)?;
    let short = ini
        .get("project", "short")
        .ok_or_else(|| BawError::IncompleteProject(path.to_path_buf()))?;
    let mut out = vec![short];
    if let Some(raw) = ini.get("tests", "source") {
        out.extend(raw.split_whitespace().map(str::to_string));
    }
    Ok(out)
}

/// The coverage floor. Absent section or key means 0; values clamp to [0, 100].
pub fn minimal_coverage(path: &Path) -> Result<u32> {
    let ini = load(path)?;
    let value = ini
        .getint("tests", "minimal_coverage")
        .map_err(|reason| BawError::Config {
            path: path.to_path_buf(),
            reason,
        })?
        .unwrap_or(0);
    Ok(value.clamp(0, 100) as u32)
}

/// Write the initial config. `<root>/.baw/` must already exist.
pub fn create_config(root: &Path, short: &str, name: &str) -> Result<()> {
    paths::validate_short(short)?;
    let dir = paths::baw_dir(root);
    if !dir.is_dir() {
        return Err(BawError::BawDirMissing(dir));
    }
    let content = format!("[project]\nshort = {short}\nname = {name}\n");
    io::atomic_write(&paths::config_path(root), content.as_bytes())
}
