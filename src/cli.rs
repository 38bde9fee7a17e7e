use std::path::PathBuf;

use clap::Parser;

use crate::models::Version;

#[derive(Parser, Debug)]
#[command(
    name = "modlist",
    about = "List the JDK modules a JAR needs, as computed by jdeps",
    version
)]
pub struct Cli {
    /// JAR to analyze
    pub jar: PathBuf,

    /// Dependency JAR to put on the class path (repeatable)
    #[arg(long = "dep", value_name = "JAR")]
    pub deps: Vec<PathBuf>,

    /// Class path string, split with the platform path separator
    #[arg(long = "class-path", value_name = "PATHS")]
    pub class_path: Option<String>,

    /// Target platform version for multi-release JARs [default: analysis.release from config]
    #[arg(long, value_name = "VERSION")]
    pub release: Option<Version>,

    /// jdeps binary to use instead of looking it up
    #[arg(long, value_name = "PATH")]
    pub jdeps: Option<PathBuf>,

    /// Config file [default: ./.modlist/config.toml, fallback ~/.config/modlist/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the comma-separated module list to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Fail with exit code 2 when jdeps is too old
    #[arg(long)]
    pub strict: bool,

    /// Debug logging, including the full jdeps command line
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print the module list
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

impl Cli {
    /// All dependency JARs named by `--dep` and `--class-path`.
    pub fn dependency_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.deps.clone();
        if let Some(class_path) = &self.class_path {
            paths.extend(
                std::env::split_paths(class_path).filter(|p| !p.as_os_str().is_empty()),
            );
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let cli = Cli::try_parse_from(["modlist", "app.jar"]).unwrap();
        assert_eq!(cli.jar, PathBuf::from("app.jar"));
        assert!(cli.release.is_none());
        assert!(cli.dependency_paths().is_empty());
        assert!(matches!(cli.report, ReportFormat::Terminal));
    }

    #[test]
    fn test_release_parses_as_version() {
        let cli = Cli::try_parse_from(["modlist", "app.jar", "--release", "17.0.2"]).unwrap();
        assert_eq!(cli.release.unwrap().feature(), 17);

        assert!(Cli::try_parse_from(["modlist", "app.jar", "--release", "seventeen"]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_deps_and_class_path_are_merged() {
        let cli = Cli::try_parse_from([
            "modlist",
            "app.jar",
            "--dep",
            "/libs/a.jar",
            "--class-path",
            "/libs/b.jar::/libs/c.jar",
        ])
        .unwrap();

        assert_eq!(
            cli.dependency_paths(),
            [
                PathBuf::from("/libs/a.jar"),
                PathBuf::from("/libs/b.jar"),
                PathBuf::from("/libs/c.jar"),
            ]
        );
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["modlist", "app.jar", "-v", "-q"]).is_err());
    }
}
