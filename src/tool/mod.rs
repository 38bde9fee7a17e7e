//! The external `jdeps` tool as a command-runner capability.
//!
//! [`ToolRunner`] is the seam: [`process::ProcessTool`] spawns a real
//! subprocess, tests substitute a scripted double. [`locate`] finds the real
//! binary and [`version::detect`] asks it for its version.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ToolConfig;
use crate::error::ModuleListError;

pub mod process;
pub mod version;

pub use process::ProcessTool;

/// Something that can run the analysis tool.
pub trait ToolRunner {
    /// Short name used in log lines and error messages, e.g. `jdeps`.
    fn name(&self) -> &str;

    /// Run the tool with `args`, streaming its stdout into `out` and its
    /// stderr into `err`, and return its exit status.
    fn run(
        &self,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
        args: &[String],
    ) -> Result<i32, ModuleListError>;
}

/// Find the `jdeps` binary described by `config`.
///
/// Lookup order:
/// 1. `config.path`, which must exist when given
/// 2. `$JAVA_HOME/bin/<name>`
/// 3. `<name>` on `PATH`
pub fn locate(config: &ToolConfig) -> Result<ProcessTool, ModuleListError> {
    let java_home = std::env::var_os("JAVA_HOME").map(PathBuf::from);
    locate_with(config, java_home.as_deref())
}

fn locate_with(
    config: &ToolConfig,
    java_home: Option<&Path>,
) -> Result<ProcessTool, ModuleListError> {
    if let Some(path) = &config.path {
        if path.is_file() {
            return Ok(ProcessTool::new(&config.name, path.clone()));
        }
        return Err(ModuleListError::ToolNotFound {
            name: config.name.clone(),
            reason: format!("{} does not exist or is not a file", path.display()),
        });
    }

    if let Some(home) = java_home {
        let candidate = home.join("bin").join(executable_name(&config.name));
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Using {} from JAVA_HOME", config.name);
            return Ok(ProcessTool::new(&config.name, candidate));
        }
    }

    match which::which(&config.name) {
        Ok(path) => Ok(ProcessTool::new(&config.name, path)),
        Err(e) => Err(ModuleListError::ToolNotFound {
            name: config.name.clone(),
            reason: e.to_string(),
        }),
    }
}

fn executable_name(name: &str) -> String {
    if cfg!(windows) && !name.ends_with(".exe") {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tool_config(name: &str, path: Option<PathBuf>) -> ToolConfig {
        ToolConfig {
            name: name.to_string(),
            path,
        }
    }

    #[test]
    fn test_missing_tool_on_path() {
        let config = tool_config("modlist-test-no-such-jdeps", None);
        let err = locate_with(&config, None).unwrap_err();
        assert!(matches!(err, ModuleListError::ToolNotFound { .. }));
        assert!(err.to_string().contains("modlist-test-no-such-jdeps"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let config = tool_config("jdeps", Some(dir.path().join("bin").join("jdeps")));
        let err = locate_with(&config, None).unwrap_err();
        assert!(matches!(err, ModuleListError::ToolNotFound { .. }));
    }

    #[test]
    fn test_explicit_path_rejects_directory() {
        let dir = tempdir().unwrap();
        let config = tool_config("jdeps", Some(dir.path().to_path_buf()));
        assert!(locate_with(&config, None).is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let jdeps = dir.path().join("jdeps");
        std::fs::write(&jdeps, b"").unwrap();

        let tool = locate_with(&tool_config("jdeps", Some(jdeps.clone())), None).unwrap();
        assert_eq!(tool.path(), jdeps.as_path());
        assert_eq!(tool.name(), "jdeps");
    }

    #[test]
    fn test_java_home_bin_is_used() {
        let home = tempdir().unwrap();
        let bin = home.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let jdeps = bin.join(executable_name("modlist-test-jdeps"));
        std::fs::write(&jdeps, b"").unwrap();

        let config = tool_config("modlist-test-jdeps", None);
        let tool = locate_with(&config, Some(home.path())).unwrap();
        assert_eq!(tool.path(), jdeps.as_path());
    }

    #[test]
    fn test_java_home_without_tool_falls_through() {
        let home = tempdir().unwrap();
        let config = tool_config("modlist-test-no-such-jdeps", None);
        assert!(matches!(
            locate_with(&config, Some(home.path())),
            Err(ModuleListError::ToolNotFound { .. })
        ));
    }
}
