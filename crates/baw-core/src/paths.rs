use crate::error::{BawError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BAW_DIR: &str = ".baw";
pub const CONFIG_FILE: &str = ".baw/project.config";
pub const TESTS_DIR: &str = "tests";
pub const BUILD_DIR: &str = "build";
pub const TMP_DIR: &str = "build/tmp";
pub const REPORT_DIR: &str = "build/tmp/report";
pub const VIRTUAL_DIR: &str = "virtual";
pub const TESTS_LOG: &str = "tests.log";
pub const TEMPLATES_DIR: &str = "templates";

/// Environment variable overriding tool-root discovery (used by tests).
pub const BAW_ROOT_ENV: &str = "BAW_ROOT";

pub fn baw_dir(root: &Path) -> PathBuf {
    root.join(BAW_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// ProjectPaths
// ---------------------------------------------------------------------------

/// Per-project directory layout, derived from the root and the project short.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub short: String,
    pub source: PathBuf,
    pub tests: PathBuf,
    pub tmp: PathBuf,
    pub report: PathBuf,
    pub virtual_env: PathBuf,
    pub baw_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path, short: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            short: short.to_string(),
            source: root.join(short),
            tests: root.join(TESTS_DIR),
            tmp: root.join(TMP_DIR),
            report: root.join(REPORT_DIR),
            virtual_env: root.join(VIRTUAL_DIR),
            baw_dir: root.join(BAW_DIR),
        }
    }

    pub fn tests_log(&self) -> PathBuf {
        self.tmp.join(TESTS_LOG)
    }
}

// ---------------------------------------------------------------------------
// ToolPaths
// ---------------------------------------------------------------------------

/// Layout of the tool's own install root, where templates live.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub tool_root: PathBuf,
    pub templates: PathBuf,
    pub pytest_config: PathBuf,
    pub coverage_config: PathBuf,
}

impl ToolPaths {
    pub fn from_root(tool_root: &Path) -> Self {
        let templates = tool_root.join(TEMPLATES_DIR);
        Self {
            tool_root: tool_root.to_path_buf(),
            pytest_config: templates.join("pytest.ini"),
            coverage_config: templates.join(".coveragerc"),
            templates,
        }
    }

    /// Resolve the tool install root.
    ///
    /// Priority:
    /// 1. `BAW_ROOT` env var
    /// 2. Walk upward from the executable's directory looking for `templates/`
    pub fn discover() -> Result<Self> {
        if let Ok(explicit) = std::env::var(BAW_ROOT_ENV) {
            return Ok(Self::from_root(Path::new(&explicit)));
        }

        let exe = std::env::current_exe()
            .map_err(|e| BawError::ToolRoot(format!("cannot locate executable: {e}")))?;
        let mut dir = exe.parent();
        while let Some(d) = dir {
            if d.join(TEMPLATES_DIR).is_dir() {
                return Ok(Self::from_root(d));
            }
            dir = d.parent();
        }
        Err(BawError::ToolRoot(format!(
            "no {TEMPLATES_DIR}/ directory above {}",
            exe.display()
        )))
    }
}

// ---------------------------------------------------------------------------
// Root resolution
// ---------------------------------------------------------------------------

/// Walk upward from `start` looking for a directory containing
/// `.baw/project.config`. Returns None when no project encloses `start`.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if config_path(dir).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

// ---------------------------------------------------------------------------
// Short validation
// ---------------------------------------------------------------------------

static SHORT_RE: OnceLock<Regex> = OnceLock::new();

fn short_re() -> &'static Regex {
    SHORT_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_\-]*$").unwrap())
}

/// A short must be usable verbatim as a directory name and a coverage target.
pub fn validate_short(short: &str) -> Result<()> {
    if short.is_empty() || short.len() > 64 || !short_re().is_match(short) {
        return Err(BawError::InvalidShort(short.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
