use std::path::PathBuf;

use thiserror::Error;

use crate::models::VersionError;

/// Hard failures of a module-list run.
///
/// An incompatible `jdeps` is deliberately absent: it is reported through
/// [`Outcome::Skipped`](crate::generator::Outcome::Skipped) instead.
#[derive(Debug, Error)]
pub enum ModuleListError {
    #[error("{name} tool not found: {reason}")]
    ToolNotFound { name: String, reason: String },

    #[error("failed to run {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {tool} version output '{output}': {source}")]
    VersionUnparseable {
        tool: String,
        output: String,
        #[source]
        source: VersionError,
    },

    #[error("cannot make {} absolute: {source}", .path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path is not valid UTF-8 and cannot be passed to jdeps: {}", .path.display())]
    NonUnicodePath { path: PathBuf },

    #[error("Invocation of {tool} failed with exit code {exit_code}: {command}")]
    AnalysisFailed {
        tool: String,
        exit_code: i32,
        command: String,
    },
}
