//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use wpgen_config::ConfigError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Options(e) => miette::miette!(
            help = "Check wpgen.toml, the package.json \"wpgen\" field and WPGEN_* variables",
            "Invalid options: {}",
            e
        ),
        CliError::FileNotFound(path) => miette::miette!(
            help = "Pass an existing path or run from the project directory",
            "File not found: {}",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::EmptyStage => miette::miette!(
            help = "Pass page names, e.g. --stage home,about",
            "{}",
            err
        ),
        ConfigError::InvalidOverride { .. } => miette::miette!(
            help = "Override keys must keep the shape of the generated configuration",
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}
