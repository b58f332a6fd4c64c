//! Config command implementation.
//!
//! Assembles the configuration and prints it as JSON, or writes it to a file.

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::config::load_options;
use crate::error::{Result, ResultExt};
use crate::ui;
use tracing::debug;

/// Execute the config command.
///
/// # Steps
///
/// 1. Layer options from defaults, options file, environment and flags
/// 2. Assemble the configuration
/// 3. Print it on stdout, or write it to `--write FILE`
///
/// # Errors
///
/// Returns option, assembly and I/O errors. Nothing is written on error.
pub fn execute(args: ConfigArgs) -> Result<()> {
    let cwd = utils::get_cwd(args.assemble.cwd.as_deref())?;
    let options = load_options(&args.assemble, &cwd)?;
    let ctx = utils::env_context(&cwd)?;

    let config = wpgen_config::assemble(options, &ctx)?;
    let json = if args.compact {
        serde_json::to_string(&config)?
    } else {
        config.to_json_pretty()?
    };

    match args.write {
        Some(path) => {
            let path = utils::resolve_path(&path, &cwd);
            debug!(path = %path.display(), bytes = json.len(), "writing configuration");
            utils::write_output(&path, &format!("{json}\n"))
                .with_path(&path)
                .with_hint("Check that the output directory is writable")?;
            ui::success(&format!(
                "Wrote configuration for {} page(s) to {}",
                config.entry.len(),
                path.display()
            ));
        }
        None => println!("{json}"),
    }

    Ok(())
}
