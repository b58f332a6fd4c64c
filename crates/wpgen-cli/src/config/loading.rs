use std::path::Path;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde_json::{Map, Value};
use tracing::debug;
use wpgen_config::{load_value_from, BuildOptions, Environment, OptionsDiscovery};

use crate::cli::AssembleArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};

/// Prefix of environment variables that set options (`WPGEN_DIST_PATH`, ...).
pub const ENV_PREFIX: &str = "WPGEN_";

/// Load build options from every source.
///
/// `cwd` is where the options file is looked up and where the source
/// directory is guessed when neither `SRC`, the options file nor the
/// environment names one.
pub fn load_options(args: &AssembleArgs, cwd: &Path) -> Result<BuildOptions> {
    let mut layers = Figment::new();

    let options_file = match &args.config {
        Some(path) => {
            let path = utils::resolve_path(path, cwd);
            if !path.is_file() {
                return Err(CliError::FileNotFound(path));
            }
            Some(path)
        }
        None => OptionsDiscovery::new(cwd).find(),
    };
    if let Some(path) = options_file {
        debug!(path = %path.display(), "loading options file");
        layers = layers.merge(Serialized::defaults(load_value_from(&path)?));
    }

    layers = layers.merge(Env::prefixed(ENV_PREFIX));

    let mut flags = cli_layer(args);
    if args.src.is_none() && !layers.contains("src_path") {
        let guessed = utils::guess_src_path(cwd).ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "no source directory found in {} (looked for {})",
                cwd.display(),
                utils::SRC_CANDIDATES.join(", ")
            ))
        })?;
        debug!(src = %guessed.display(), "guessed source directory");
        flags.insert("src_path".into(), path_value(&guessed));
    }

    let options: BuildOptions = Figment::from(Serialized::defaults(BuildOptions::default()))
        .merge(layers)
        .merge(Serialized::defaults(Value::Object(flags)))
        .extract()?;
    Ok(options)
}

/// Options set explicitly on the command line.
///
/// Flags left at their defaults are omitted so lower layers show through.
pub fn cli_layer(args: &AssembleArgs) -> Map<String, Value> {
    let mut layer = Map::new();

    if let Some(src) = &args.src {
        layer.insert("src_path".into(), path_value(src));
    }
    if let Some(out) = &args.out {
        layer.insert("dist_path".into(), path_value(out));
    }
    if let Some(env) = args.env {
        layer.insert(
            "env".into(),
            Value::String(Environment::from(env).as_str().to_string()),
        );
    }
    if let Some(public_path) = &args.public_path {
        layer.insert("public_path".into(), Value::String(public_path.clone()));
    }
    if let Some(stage) = &args.stage {
        layer.insert("stage".into(), Value::String(stage.clone()));
    }
    if args.source_map {
        layer.insert("source_map".into(), Value::Bool(true));
    }

    let disabled = [
        ("extract_css", args.no_extract_css),
        ("manifest", args.no_manifest),
        ("bundle_analyzer", args.no_bundle_analyzer),
        ("sw_precache", args.no_sw_precache),
        ("html", args.no_html),
    ];
    for (key, off) in disabled {
        if off {
            layer.insert(key.into(), Value::Bool(false));
        }
    }

    layer
}

fn path_value(path: &Path) -> Value {
    Value::String(path.display().to_string())
}
