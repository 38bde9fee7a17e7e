//! Report renderers for module-list runs.
//!
//! - [`terminal`] — colored summary table plus the module list; respects `--quiet`.
//! - [`json`] — the [`ModuleReport`](crate::models::ModuleReport) as pretty JSON.
//! - [`write_module_file`] — the bare list for `jlink --add-modules`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ModuleList;

pub mod json;
pub mod terminal;

/// Write `modules` comma-separated with a trailing newline.
pub fn write_module_file(modules: &ModuleList, path: &Path) -> Result<()> {
    std::fs::write(path, format!("{}\n", modules))
        .with_context(|| format!("failed to write module list to {}", path.display()))
}
