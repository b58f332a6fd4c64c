use clap::ValueEnum;
use wpgen_config::Environment;

/// Build environment selected on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum EnvArg {
    /// Readable class names, cheap source maps, no minification
    #[value(name = "development", alias = "dev")]
    Development,

    /// Digested filenames, vendor chunk splitting and minification
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<EnvArg> for Environment {
    fn from(arg: EnvArg) -> Self {
        match arg {
            EnvArg::Development => Environment::Development,
            EnvArg::Production => Environment::Production,
        }
    }
}
