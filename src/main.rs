//! `modlist` — ask `jdeps` which JDK modules a JAR needs.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and set up logging ([`logging::subscriber`]).
//! 3. Locate `jdeps` ([`tool::locate`]).
//! 4. Query its version, build the arguments and run the analysis ([`generator`]).
//! 5. Collect the module list from the captured stdout ([`models::ModuleList`]).
//! 6. Render the requested report ([`report`]) and optionally write the list to a file.
//! 7. Exit `0` on success, `1` on a hard failure, `2` when `jdeps` is too old
//!    and `--strict` is set.

mod cli;
mod config;
mod error;
mod generator;
mod logging;
mod models;
mod report;
mod tool;

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::Level;

use cli::{Cli, ReportFormat};
use config::load_config;
use generator::{ModuleListGenerator, Outcome};
use logging::sink::{StdoutCapture, TracingLog};
use logging::subscriber::{init_logging, parse_level, LoggingConfig};
use models::{DependencyJar, ModuleList, ModuleReport, ReportStatus, Version};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        parse_level(&config.logging.level)
    };
    init_logging(LoggingConfig {
        use_json: config.logging.json,
        ..LoggingConfig::with_level(level)
    });

    let release = match cli
        .release
        .clone()
        .or_else(|| config.analysis.release.map(Version::from))
    {
        Some(release) => release,
        None => bail!("no target release: pass --release or set analysis.release in the config"),
    };

    let mut tool_config = config.tool.clone();
    if let Some(path) = &cli.jdeps {
        tool_config.path = Some(path.clone());
    }

    let dependencies: BTreeSet<DependencyJar> = cli
        .dependency_paths()
        .into_iter()
        .map(DependencyJar::new)
        .collect();
    let dependency_count = dependencies.len();

    tracing::debug!(
        jar = %cli.jar.display(),
        release = %release,
        dependencies = dependency_count,
        "Computing module list"
    );

    let capture = StdoutCapture::new(TracingLog);
    let outcome = {
        let generator = ModuleListGenerator::locate(
            &cli.jar,
            dependencies,
            release.clone(),
            &capture,
            &tool_config,
        )?;
        generator.run()?
    };
    let stdout_lines = capture.into_lines();

    let mut required = None;
    let (status, tool_version, modules) = match outcome {
        Outcome::Completed { tool_version } => (
            ReportStatus::Completed,
            tool_version,
            ModuleList::from_tool_output(&stdout_lines),
        ),
        Outcome::Skipped {
            tool_version,
            required: minimum,
        } => {
            required = Some(minimum);
            (ReportStatus::Skipped, tool_version, ModuleList::default())
        }
    };

    let module_report = ModuleReport {
        artifact: cli.jar.clone(),
        release: release.feature(),
        tool_version: tool_version.to_string(),
        dependencies: dependency_count,
        status,
        modules,
    };

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&module_report, cli.quiet)?,
        ReportFormat::Json => report::json::render(&module_report)?,
    }

    match module_report.status {
        ReportStatus::Completed => {
            if let Some(path) = &cli.output {
                report::write_module_file(&module_report.modules, path)?;
                tracing::info!(path = %path.display(), "Wrote module list");
            }
        }
        ReportStatus::Skipped => {
            if cli.strict || config.analysis.strict {
                tracing::error!(
                    found = %module_report.tool_version,
                    required = required.unwrap_or(generator::MINIMUM_JDEPS_FEATURE),
                    "Failing because strict mode is on"
                );
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
