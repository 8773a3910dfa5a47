use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BawError {
    #[error("not a baw project: no .baw/project.config found (run 'baw --init <short> <name>')")]
    NotInitialized,

    #[error("project already initialized at {0}")]
    ProjectExists(PathBuf),

    #[error("No testdirectory at {0}")]
    NoTestDirectory(PathBuf),

    #[error("invalid project short '{0}': must be a lowercase directory-safe token")]
    InvalidShort(String),

    #[error("cannot write project config: {0} does not exist")]
    BawDirMissing(PathBuf),

    #[error("malformed project config {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("project config {0} is missing a [project] section with 'short' and 'name'")]
    IncompleteProject(PathBuf),

    #[error("failed to start '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("no python interpreter found on PATH")]
    PythonNotFound,

    #[error("template not found: {0}")]
    TemplateMissing(PathBuf),

    #[error("stash failed: {0}")]
    Stash(String),

    #[error("tool root could not be resolved: {0}")]
    ToolRoot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BawError>;
