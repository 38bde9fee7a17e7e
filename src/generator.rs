use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::Level;

use crate::config::ToolConfig;
use crate::error::ModuleListError;
use crate::logging::{Log, LogWriter};
use crate::models::{DependencyJar, Version};
use crate::tool::{self, ProcessTool, ToolRunner};

/// Oldest `jdeps` whose `--print-module-deps` output can be trusted.
pub const MINIMUM_JDEPS_FEATURE: u32 = 12;

/// Host class path separator.
pub const PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// How a run ended when it did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `jdeps` ran and exited with status 0.
    Completed { tool_version: Version },
    /// `jdeps` is too old; nothing was analyzed and an error was logged.
    Skipped { tool_version: Version, required: u32 },
}

/// Drives `jdeps --print-module-deps` for one JAR.
pub struct ModuleListGenerator<'a, T: ToolRunner> {
    project_jar: PathBuf,
    dependencies: BTreeSet<DependencyJar>,
    jvm_version: Version,
    log: &'a dyn Log,
    jdeps: T,
}

impl<'a> ModuleListGenerator<'a, ProcessTool> {
    /// Locate `jdeps` and build a generator around it. Fails with
    /// [`ModuleListError::ToolNotFound`] before anything is spawned.
    pub fn locate(
        project_jar: impl Into<PathBuf>,
        dependencies: impl IntoIterator<Item = DependencyJar>,
        jvm_version: Version,
        log: &'a dyn Log,
        tool_config: &ToolConfig,
    ) -> Result<Self, ModuleListError> {
        let jdeps = tool::locate(tool_config)?;
        tracing::debug!(path = %jdeps.path().display(), "Located {}", jdeps.name());
        Ok(Self::new(project_jar, dependencies, jvm_version, log, jdeps))
    }
}

impl<'a, T: ToolRunner> ModuleListGenerator<'a, T> {
    pub fn new(
        project_jar: impl Into<PathBuf>,
        dependencies: impl IntoIterator<Item = DependencyJar>,
        jvm_version: Version,
        log: &'a dyn Log,
        jdeps: T,
    ) -> Self {
        Self {
            project_jar: project_jar.into(),
            dependencies: dependencies.into_iter().collect(),
            jvm_version,
            log,
            jdeps,
        }
    }

    pub fn run(&self) -> Result<Outcome, ModuleListError> {
        let tool_version = tool::version::detect(&self.jdeps)?;
        if tool_version.feature() < MINIMUM_JDEPS_FEATURE {
            self.log.error(&format!(
                "The {} option this tool uses to list JDK modules only works flawlessly on JDK {}+ \
                 (found {}), so please use a newer JDK to run it.",
                self.jdeps.name(),
                MINIMUM_JDEPS_FEATURE,
                tool_version
            ));
            return Ok(Outcome::Skipped {
                tool_version,
                required: MINIMUM_JDEPS_FEATURE,
            });
        }

        let command = self.arguments()?;
        let command_line = format!("{} {}", self.jdeps.name(), command.join(" "));
        self.log.debug(&format!("Running {}", command_line));

        let exit_code = {
            let mut out = LogWriter::new(self.log, Level::INFO);
            let mut err = LogWriter::new(self.log, Level::WARN);
            self.jdeps.run(&mut out, &mut err, &command)?
        };

        if exit_code != 0 {
            return Err(ModuleListError::AnalysisFailed {
                tool: self.jdeps.name().to_string(),
                exit_code,
                command: command_line,
            });
        }

        Ok(Outcome::Completed { tool_version })
    }

    /// The full `jdeps` argument list for the analysis run.
    pub fn arguments(&self) -> Result<Vec<String>, ModuleListError> {
        Ok(vec![
            "--print-module-deps".to_string(),
            "--ignore-missing-deps".to_string(),
            "--multi-release".to_string(),
            self.jvm_version.feature().to_string(),
            "--class-path".to_string(),
            class_path(&self.dependencies)?,
            path_argument(&absolute(&self.project_jar)?)?,
        ])
    }
}

/// Join the dependency paths, made absolute, deduplicated and sorted, with
/// the host separator.
pub fn class_path<'d>(
    dependencies: impl IntoIterator<Item = &'d DependencyJar>,
) -> Result<String, ModuleListError> {
    let mut entries = BTreeSet::new();
    for dep in dependencies {
        entries.insert(absolute(dep.jar_path())?);
    }

    let entries = entries
        .iter()
        .map(|p| path_argument(p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries.join(&PATH_SEPARATOR.to_string()))
}

/// Paths reach jdeps byte for byte or not at all; a lossy rendering would
/// name a different file, which `--ignore-missing-deps` then drops silently.
fn path_argument(path: &Path) -> Result<String, ModuleListError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| ModuleListError::NonUnicodePath {
            path: path.to_path_buf(),
        })
}

fn absolute(path: &Path) -> Result<PathBuf, ModuleListError> {
    std::path::absolute(path).map_err(|source| ModuleListError::InvalidPath {
        path: path.to_path_buf(),
        source,
    })
}
