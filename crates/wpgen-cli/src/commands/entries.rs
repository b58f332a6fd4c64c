//! Entries command implementation.
//!
//! Lists the pages that would be built, one `name<TAB>path` line each.

use crate::cli::EntriesArgs;
use crate::commands::utils;
use crate::config::load_options;
use crate::error::Result;
use crate::ui;
use wpgen_config::{apply_stage, discover_entries};

/// Execute the entries command.
///
/// # Errors
///
/// Returns option errors, the empty-stage error and pages directory read
/// failures.
pub fn execute(args: EntriesArgs) -> Result<()> {
    let cwd = utils::get_cwd(args.assemble.cwd.as_deref())?;
    let options = load_options(&args.assemble, &cwd)?;
    let ctx = utils::env_context(&cwd)?;
    let resolved = options.resolve(&ctx);

    let entries = discover_entries(&resolved.pages_path)?;
    let entries = apply_stage(entries, options.stage.as_deref())?;

    if entries.is_empty() {
        ui::warning(&format!(
            "No pages found in {}",
            resolved.pages_path.display()
        ));
    }

    for (name, path) in &entries {
        println!("{name}\t{}", path.display());
    }

    Ok(())
}
