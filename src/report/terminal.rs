use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{ModuleReport, ReportStatus};

/// Render a colored terminal report.
pub fn render(report: &ModuleReport, quiet: bool) -> Result<()> {
    if quiet {
        if report.status == ReportStatus::Completed {
            println!("{}", report.modules);
        }
        return Ok(());
    }

    println!("\n {} v{}", "modlist".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Analyzing: {}\n", report.artifact.display());

    println!("{}", summary_table(report));
    println!();

    match report.status {
        ReportStatus::Completed if report.modules.is_empty() => {
            println!(" {} jdeps reported no JDK modules\n", "[WARN]".yellow().bold());
        }
        ReportStatus::Completed => {
            println!(" {} Required modules:\n", "[OK]".green().bold());
            for module in report.modules.modules() {
                println!("   {} {}", "•".cyan(), module);
            }
            println!("\n {}\n", report.modules.to_string().bold());
        }
        ReportStatus::Skipped => {
            println!(
                " {} jdeps {} is too old; run with JDK 12 or newer\n",
                "[SKIPPED]".red().bold(),
                report.tool_version
            );
        }
    }

    Ok(())
}

fn summary_table(report: &ModuleReport) -> Table {
    let (status, status_color) = match report.status {
        ReportStatus::Completed => ("✓ completed", Color::Green),
        ReportStatus::Skipped => ("✗ skipped", Color::Red),
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Artifact").add_attribute(Attribute::Bold),
            Cell::new("Release").add_attribute(Attribute::Bold),
            Cell::new("jdeps").add_attribute(Attribute::Bold),
            Cell::new("Dependencies").add_attribute(Attribute::Bold),
            Cell::new("Modules").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    table.add_row(vec![
        Cell::new(report.artifact.display()),
        Cell::new(report.release),
        Cell::new(&report.tool_version),
        Cell::new(report.dependencies),
        Cell::new(report.modules.modules().len()),
        Cell::new(status).fg(status_color),
    ]);

    table
}
