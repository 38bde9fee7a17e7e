use anyhow::Result;

use crate::models::ModuleReport;

/// Print the report as pretty JSON on stdout.
pub fn render(report: &ModuleReport) -> Result<()> {
    println!("{}", to_string(report)?);
    Ok(())
}

fn to_string(report: &ModuleReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
