use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// A resolved dependency JAR that goes onto the analysis class path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyJar {
    path: PathBuf,
}

impl DependencyJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn jar_path(&self) -> &Path {
        &self.path
    }
}

/// Runtime version grammar: `$VNUM(-$PRE)?(\+$BUILD?)?(-$OPT)?`.
const VERSION_PATTERN: &str = r"^(?P<feature>[1-9][0-9]*)(?:(?:\.0)*\.[1-9][0-9]*)*(?:-(?P<pre>[a-zA-Z0-9]+))?(?:(?P<plus>\+)(?P<build>0|[1-9][0-9]*)?)?(?:-(?P<opt>[-a-zA-Z0-9.]+))?$";

fn version_regex() -> &'static Regex {
    static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();
    VERSION_REGEX.get_or_init(|| Regex::new(VERSION_PATTERN).expect("Invalid version regex"))
}

fn module_name_regex() -> &'static Regex {
    static MODULE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    MODULE_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("Invalid module name regex")
    })
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid version string: '{0}'")]
    Malformed(String),

    #[error("'+' without a build number must be followed by an optional part, with no pre-release: '{0}'")]
    DanglingPlus(String),

    #[error("feature version out of range in '{0}'")]
    OutOfRange(String),
}

/// A Java runtime version such as `17`, `11.0.2` or `21.0.1+12-LTS`.
///
/// Only the leading feature number takes part in comparisons and argument
/// rendering; the raw text is kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    feature: u32,
}

impl Version {
    /// Parse a runtime version string. Surrounding whitespace is not accepted;
    /// callers trim captured tool output first.
    ///
    /// Accepted shapes are `$VNUM(-$PRE)?+$BUILD(-$OPT)?`, `$VNUM-$PRE(-$OPT)?`
    /// and `$VNUM(+-$OPT)?`.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let caps = version_regex()
            .captures(text)
            .ok_or_else(|| VersionError::Malformed(text.to_string()))?;

        let pre = caps.name("pre").is_some();
        let build = caps.name("build").is_some();
        let opt = caps.name("opt").is_some();
        if caps.name("plus").is_some() {
            // `17+` and `17-ea+-x` carry a '+' that leads nowhere.
            if !build && (!opt || pre) {
                return Err(VersionError::DanglingPlus(text.to_string()));
            }
        } else if opt && !pre {
            return Err(VersionError::Malformed(text.to_string()));
        }

        let feature = caps["feature"]
            .parse::<u32>()
            .map_err(|_| VersionError::OutOfRange(text.to_string()))?;

        Ok(Self {
            raw: text.to_string(),
            feature,
        })
    }

    pub fn feature(&self) -> u32 {
        self.feature
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl From<u32> for Version {
    fn from(feature: u32) -> Self {
        Self {
            raw: feature.to_string(),
            feature,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// The JDK modules reported by `jdeps --print-module-deps`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleList(Vec<String>);

impl ModuleList {
    /// Build the list from the lines `jdeps` printed on stdout.
    ///
    /// Warning and error lines are skipped, as is any token that is not a
    /// well-formed module name. First occurrence wins.
    pub fn from_tool_output<S: AsRef<str>>(lines: &[S]) -> Self {
        let module_name = module_name_regex();
        let mut modules: Vec<String> = Vec::new();

        for line in lines {
            let line = line.as_ref().trim();
            if line.starts_with("Warning") || line.starts_with("Error") {
                continue;
            }
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if module_name.is_match(token) && !modules.iter().any(|m| m == token) {
                    modules.push(token.to_string());
                }
            }
        }

        Self(modules)
    }

    pub fn modules(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ModuleList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Completed,
    Skipped,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Completed => write!(f, "completed"),
            ReportStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Everything a report renderer needs about one run.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub artifact: PathBuf,
    pub release: u32,
    pub tool_version: String,
    pub dependencies: usize,
    pub status: ReportStatus,
    pub modules: ModuleList,
}
